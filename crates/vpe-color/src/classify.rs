//! Descriptor classification.
//!
//! Maps an external [`ColorDescriptor`] to the internal
//! ([`ColorSpace`], [`TransferFunction`]) pair. The lookup is total:
//! combinations outside the supported table yield `Unknown` for the
//! affected half.
//!
//! | Primaries | Encoding | Range | Color space |
//! |-----------|----------|-------|-------------|
//! | BT.709 | RGB | full | sRGB (scRGB with a linear curve) |
//! | BT.709 | RGB | studio | sRGB limited |
//! | BT.709 | YCbCr | full/studio | BT.709 YCbCr |
//! | BT.601 | YCbCr | full/studio | BT.601 YCbCr |
//! | JFIF | YCbCr | full | JFIF |
//! | BT.2020 | RGB/YCbCr | full/studio | BT.2020 |
//!
//! HDR curves (PQ, HLG) are only defined on BT.2020 primaries, and a
//! linear curve only on RGB.

use vpe_core::{ColorDescriptor, ColorPrimaries, ColorRange, ColorSpace, PixelEncoding, TransferCurve, TransferFunction};

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Classification {
    /// Internal color space.
    pub color_space: ColorSpace,
    /// Internal transfer function.
    pub transfer_function: TransferFunction,
}

impl Classification {
    /// Both halves are `Unknown`.
    pub fn is_fully_unknown(&self) -> bool {
        self.color_space == ColorSpace::Unknown && self.transfer_function == TransferFunction::Unknown
    }

    /// Neither half is `Unknown`.
    pub fn is_supported(&self) -> bool {
        self.color_space != ColorSpace::Unknown && self.transfer_function != TransferFunction::Unknown
    }
}

/// Classifies a descriptor.
///
/// # Example
///
/// ```rust
/// use vpe_color::classify;
/// use vpe_core::{ColorDescriptor, ColorSpace, TransferFunction};
///
/// let c = classify(&ColorDescriptor::srgb());
/// assert_eq!(c.color_space, ColorSpace::Srgb);
/// assert_eq!(c.transfer_function, TransferFunction::Srgb);
/// ```
pub fn classify(desc: &ColorDescriptor) -> Classification {
    Classification {
        color_space: classify_color_space(desc),
        transfer_function: classify_transfer(desc),
    }
}

fn classify_color_space(desc: &ColorDescriptor) -> ColorSpace {
    use ColorPrimaries as P;
    use ColorRange as R;
    use PixelEncoding as E;

    match (desc.primaries, desc.encoding, desc.range) {
        (P::Bt709, E::Rgb, R::Full) if desc.transfer == TransferCurve::G10 => ColorSpace::MsrefScrgb,
        (P::Bt709, E::Rgb, R::Full) => ColorSpace::Srgb,
        (P::Bt709, E::Rgb, R::Studio) => ColorSpace::SrgbLimited,
        (P::Bt709, E::YCbCr, R::Full) => ColorSpace::Ycbcr709,
        (P::Bt709, E::YCbCr, R::Studio) => ColorSpace::Ycbcr709Limited,
        (P::Bt601, E::YCbCr, R::Full) => ColorSpace::Ycbcr601,
        (P::Bt601, E::YCbCr, R::Studio) => ColorSpace::Ycbcr601Limited,
        (P::Bt601, E::Rgb, _) => ColorSpace::Unknown,
        (P::Jfif, E::YCbCr, R::Full) => ColorSpace::Jfif,
        (P::Jfif, _, _) => ColorSpace::Unknown,
        (P::Bt2020, E::Rgb, R::Full) => ColorSpace::Bt2020Rgb,
        (P::Bt2020, E::Rgb, R::Studio) => ColorSpace::Bt2020RgbLimited,
        (P::Bt2020, E::YCbCr, R::Full) => ColorSpace::Bt2020Ycbcr,
        (P::Bt2020, E::YCbCr, R::Studio) => ColorSpace::Bt2020YcbcrLimited,
    }
}

fn classify_transfer(desc: &ColorDescriptor) -> TransferFunction {
    let ycbcr = desc.encoding == PixelEncoding::YCbCr;
    let wide = desc.primaries == ColorPrimaries::Bt2020;
    match desc.transfer {
        TransferCurve::Srgb => TransferFunction::Srgb,
        TransferCurve::Bt709 => TransferFunction::Bt709,
        TransferCurve::G22 if ycbcr => TransferFunction::Bt709,
        TransferCurve::G22 => TransferFunction::Srgb,
        TransferCurve::G24 => TransferFunction::Bt1886,
        TransferCurve::G10 if ycbcr => TransferFunction::Unknown,
        TransferCurve::G10 => TransferFunction::Linear,
        TransferCurve::Pq if wide => TransferFunction::Pq2084,
        TransferCurve::PqNormalized if wide => TransferFunction::NormalizedPq,
        TransferCurve::Hlg if wide => TransferFunction::Hlg,
        TransferCurve::Pq | TransferCurve::PqNormalized | TransferCurve::Hlg => TransferFunction::Unknown,
    }
}

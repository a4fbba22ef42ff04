//! Transfer curve validation against published reference values.
//!
//! # Reference Documents
//!
//! - IEC 61966-2-1: sRGB
//! - ITU-R BT.709-6: HDTV OETF
//! - SMPTE ST 2084: PQ

use approx::assert_abs_diff_eq;
use vpe_core::{SystemAllocator, TransferFunction};
use vpe_math::Fixed31_32;
use vpe_transfer::{build_regamma, pq, power, ColorTables, CurveParams, Evaluator};

// ============================================================================
// Reference Values
// ============================================================================

/// (linear, sRGB signal)
const SRGB_REFERENCE: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.001, 0.01292),
    (0.0031308, 0.040449936),
    (0.18, 0.461356),
    (0.5, 0.735357),
    (1.0, 1.0),
];

/// (linear, BT.709 signal)
const BT709_REFERENCE: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.01, 0.045),
    (0.018, 0.081),
    (0.18, 0.409),
    (1.0, 1.0),
];

/// (cd/m2, PQ signal)
const PQ_REFERENCE: &[(f64, f64)] = &[
    (0.0, 0.0000007),
    (100.0, 0.508078),
    (203.0, 0.580688),
    (1000.0, 0.751827),
    (10000.0, 1.0),
];

#[test]
fn srgb_reference() {
    for &(l, s) in SRGB_REFERENCE {
        assert_abs_diff_eq!(power::SRGB.encode(l), s, epsilon = 1e-5);
        assert_abs_diff_eq!(power::SRGB.decode(s), l, epsilon = 1e-5);
    }
}

#[test]
fn bt709_reference() {
    for &(l, s) in BT709_REFERENCE {
        assert_abs_diff_eq!(power::BT709.encode(l), s, epsilon = 1e-3);
    }
}

#[test]
fn pq_reference() {
    for &(nits, s) in PQ_REFERENCE {
        assert_abs_diff_eq!(pq::nits_to_signal(nits), s, epsilon = 1e-5);
    }
}

// ============================================================================
// Built curves
// ============================================================================

#[test]
fn regamma_curve_matches_formula() {
    let tables = ColorTables::new(&SystemAllocator).unwrap();
    let grid = tables.regamma_grid();
    for tf in [TransferFunction::Srgb, TransferFunction::Bt709, TransferFunction::Bt1886] {
        let curve = build_regamma(tf, grid, &CurveParams::default(), &SystemAllocator).unwrap();
        let eval = Evaluator::new(tf, 0).unwrap();
        for (i, &x) in grid.points().iter().enumerate() {
            let expected = eval.encode(x).clamp(0.0, 1.0);
            assert_abs_diff_eq!(curve.red()[i].to_f64(), expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn degamma_then_regamma_is_identity() {
    let tables = ColorTables::new(&SystemAllocator).unwrap();
    let dg = tables.degamma_grid();
    let degamma = tables.degamma(TransferFunction::Srgb).unwrap();
    for (i, &x) in dg.points().iter().enumerate() {
        let linear = degamma.red()[i].to_f64();
        assert_abs_diff_eq!(power::SRGB.encode(linear), x, epsilon = 1e-6);
    }
}

#[test]
fn terminal_points_saturate() {
    let tables = ColorTables::new(&SystemAllocator).unwrap();
    let grid = tables.regamma_grid();
    let curve = build_regamma(TransferFunction::Hlg, grid, &CurveParams::default(), &SystemAllocator).unwrap();
    let last = curve.get(grid.len() - 1).unwrap();
    assert_eq!(last, [Fixed31_32::ONE; 3]);
}

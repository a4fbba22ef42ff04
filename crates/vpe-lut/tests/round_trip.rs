//! Tetrahedral layout round-trip over both lattice sizes.

use vpe_core::SystemAllocator;
use vpe_lut::{Lattice, LatticeSize, TetrahedralLut, BANKS};

/// Deterministic non-identity lattice in 12-bit range.
fn scrambled(size: LatticeSize) -> Vec<u16> {
    let mut state = 0x2545_f491u32;
    (0..size.entries() * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 4096) as u16
        })
        .collect()
}

#[test]
fn round_trip_9() {
    let flat = scrambled(LatticeSize::Size9);
    let lut = TetrahedralLut::from_flat(&flat, true, &SystemAllocator).unwrap();
    assert_eq!(lut.size(), LatticeSize::Size9);
    assert_eq!(lut.reassemble().unwrap().to_flat(), flat);
}

#[test]
fn round_trip_17() {
    let flat = scrambled(LatticeSize::Size17);
    let lut = TetrahedralLut::from_flat(&flat, true, &SystemAllocator).unwrap();
    assert_eq!(lut.size(), LatticeSize::Size17);
    assert_eq!(lut.reassemble().unwrap().to_flat(), flat);
}

#[test]
fn banks_cover_every_sample_once() {
    let flat = scrambled(LatticeSize::Size17);
    let lut = TetrahedralLut::from_flat(&flat, true, &SystemAllocator).unwrap();
    let total: usize = (0..BANKS).map(|b| lut.bank(b).len()).sum();
    assert_eq!(total, 4913);
}

#[test]
fn identity_10bit_round_trip() {
    let lattice = Lattice::identity(LatticeSize::Size9, false, &SystemAllocator).unwrap();
    let lut = TetrahedralLut::convert(&lattice, false, &SystemAllocator).unwrap();
    assert!(!lut.use_12bit());
    assert_eq!(lut.reassemble().unwrap(), lattice);
}

//! Bit vector behaviour against native integer arithmetic.

use a64_core as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

use a64_core::{BitVector, BitVectorError, INLINE_WIDTH};
use proptest::prelude::*;
use rstest::rstest;

fn mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn widened(value: u64, width: usize) -> BitVector {
    let mut bits = BitVector::from_u64(INLINE_WIDTH, value);
    bits.resize(width);
    bits
}

proptest! {
    #[test]
    fn inline_bitwise_ops_match_u64(a in any::<u64>(), b in any::<u64>()) {
        let x = BitVector::from_u64(64, a);
        let y = BitVector::from_u64(64, b);
        prop_assert_eq!((&x & &y).to_u64(), Ok(a & b));
        prop_assert_eq!((&x | &y).to_u64(), Ok(a | b));
        prop_assert_eq!((&x ^ &y).to_u64(), Ok(a ^ b));
        prop_assert_eq!((!&x).to_u64(), Ok(!a));
        prop_assert_eq!(x.count_ones(), a.count_ones() as usize);
    }

    #[test]
    fn heap_backing_agrees_with_inline(a in any::<u64>(), b in any::<u64>(), width in 65usize..300) {
        let x = widened(a, width);
        let y = widened(b, width);
        prop_assert!(!x.is_inline());

        let mut and = &x & &y;
        and.resize(64);
        prop_assert_eq!(and.to_u64(), Ok(a & b));

        let mut xor = &x ^ &y;
        xor.resize(64);
        prop_assert_eq!(xor.to_u64(), Ok(a ^ b));

        let inverted = !&x;
        prop_assert_eq!(inverted.count_ones(), width - a.count_ones() as usize);
    }

    #[test]
    fn shifts_stay_inside_the_width(value in any::<u64>(), width in 1usize..=64, amount in 0usize..70) {
        let bits = BitVector::from_u64(width, value);
        let expected_left = if amount >= 64 { 0 } else { (value << amount) & mask(width) };
        let expected_right = if amount >= 64 { 0 } else { (value & mask(width)) >> amount };
        prop_assert_eq!((&bits << amount).to_u64(), Ok(expected_left));
        prop_assert_eq!((&bits >> amount).to_u64(), Ok(expected_right));
    }

    #[test]
    fn rotate_right_matches_native_at_64(value in any::<u64>(), amount in 0usize..200) {
        let bits = BitVector::from_u64(64, value);
        prop_assert_eq!(
            bits.rotate_right(amount).to_u64(),
            Ok(value.rotate_right((amount % 64) as u32))
        );
    }

    #[test]
    fn replicate_multiplies_width_and_population(value in any::<u64>(), width in 1usize..40, count in 1usize..8) {
        let bits = BitVector::from_u64(width, value);
        let repeated = bits.replicate(count);
        prop_assert_eq!(repeated.width(), width * count);
        prop_assert_eq!(repeated.count_ones(), bits.count_ones() * count);
    }

    #[test]
    fn equality_ignores_representation(value in any::<u64>(), width in 65usize..200) {
        let inline = BitVector::from_u64(64, value);
        let heap = widened(value, width);
        prop_assert_eq!(&inline, &heap);
        prop_assert!(inline == value);
    }
}

#[rstest]
#[case("", 0, 0)]
#[case("1", 1, 1)]
#[case("0101", 4, 5)]
#[case("1000000000000000000000000000000000000000000000000000000000000000", 64, 1 << 63)]
fn binary_strings_parse_msb_first(#[case] digits: &str, #[case] width: usize, #[case] value: u64) {
    let bits: BitVector = digits.parse().expect("valid digits");
    assert_eq!(bits.width(), width);
    assert_eq!(bits.to_u64(), Ok(value));
    assert_eq!(bits.to_string(), digits);
}

#[test]
fn non_binary_digit_is_rejected() {
    assert_eq!(
        "10x1".parse::<BitVector>(),
        Err(BitVectorError::InvalidDigit('x'))
    );
}

#[test]
fn conversions_report_width() {
    assert_eq!(
        BitVector::new(33).to_u32(),
        Err(BitVectorError::TooWide { width: 33, target: 32 })
    );
    assert_eq!(
        BitVector::new(65).to_u64(),
        Err(BitVectorError::TooWide { width: 65, target: 64 })
    );
}

//! Variable-width bit vector with an inline single-word fast path.
//!
//! Widths up to [`INLINE_WIDTH`] live in one `u64`; anything wider is backed
//! by a heap vector of `u64` words. Both representations keep every bit at or
//! above the declared width cleared, so value comparisons and conversions
//! never depend on which representation backs an instance.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr};
use std::str::FromStr;

use thiserror::Error;

/// Widest bit vector stored inline without a heap allocation.
pub const INLINE_WIDTH: usize = 64;

const WORD_BITS: usize = 64;

/// Errors produced by fallible bit vector conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitVectorError {
    /// Declared width exceeds the capacity of the requested integer type.
    #[error("bit vector of width {width} does not fit in {target} bits")]
    TooWide {
        /// Declared width of the vector.
        width: usize,
        /// Capacity of the requested integer type.
        target: u32,
    },
    /// A textual bit string contained something other than `0` or `1`.
    #[error("invalid binary digit {0:?}")]
    InvalidDigit(char),
}

#[derive(Debug, Clone)]
enum Repr {
    Inline { width: usize, bits: u64 },
    Heap { width: usize, words: Vec<u64> },
}

/// Bit sequence of caller-chosen width, indexed from the least-significant bit.
#[derive(Debug, Clone)]
pub struct BitVector {
    repr: Repr,
}

const fn low_mask(width: usize) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

const fn words_for(width: usize) -> usize {
    width.div_ceil(WORD_BITS)
}

fn trim_zeros(words: &[u64]) -> &[u64] {
    let len = words.iter().rposition(|word| *word != 0).map_or(0, |last| last + 1);
    &words[..len]
}

const fn shl_word(bits: u64, amount: usize) -> u64 {
    if amount >= WORD_BITS {
        0
    } else {
        bits << amount
    }
}

const fn shr_word(bits: u64, amount: usize) -> u64 {
    if amount >= WORD_BITS {
        0
    } else {
        bits >> amount
    }
}

fn shifted_left(words: &[u64], shift: usize, out_len: usize) -> Vec<u64> {
    let mut out = vec![0; out_len];
    let word_shift = shift / WORD_BITS;
    let bit_shift = shift % WORD_BITS;
    for (index, word) in words.iter().enumerate() {
        let dst = index.saturating_add(word_shift);
        if dst < out_len {
            out[dst] |= word << bit_shift;
        }
        if bit_shift != 0 && dst.saturating_add(1) < out_len {
            out[dst + 1] |= word >> (WORD_BITS - bit_shift);
        }
    }
    out
}

fn shifted_right(words: &[u64], shift: usize, out_len: usize) -> Vec<u64> {
    let word_shift = shift / WORD_BITS;
    let bit_shift = shift % WORD_BITS;
    (0..out_len)
        .map(|index| {
            let src = index.saturating_add(word_shift);
            let low = words.get(src).copied().unwrap_or(0) >> bit_shift;
            let high = if bit_shift == 0 {
                0
            } else {
                words.get(src.saturating_add(1)).copied().unwrap_or(0) << (WORD_BITS - bit_shift)
            };
            low | high
        })
        .collect()
}

impl BitVector {
    /// Creates an all-zero vector of `width` bits.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self::from_u64(width, 0)
    }

    /// Creates a vector of `width` bits holding `value` truncated to that width.
    #[must_use]
    pub fn from_u64(width: usize, value: u64) -> Self {
        if width <= INLINE_WIDTH {
            return Self::inline(width, value);
        }
        Self::from_words(width, vec![value])
    }

    const fn inline(width: usize, bits: u64) -> Self {
        Self {
            repr: Repr::Inline {
                width,
                bits: bits & low_mask(width),
            },
        }
    }

    fn from_words(width: usize, mut words: Vec<u64>) -> Self {
        if width <= INLINE_WIDTH {
            return Self::inline(width, words.first().copied().unwrap_or(0));
        }

        words.resize(words_for(width), 0);
        if let Some(last) = words.last_mut() {
            let used = width % WORD_BITS;
            if used != 0 {
                *last &= low_mask(used);
            }
        }
        Self {
            repr: Repr::Heap { width, words },
        }
    }

    fn words(&self) -> &[u64] {
        match &self.repr {
            Repr::Inline { width: 0, .. } => &[],
            Repr::Inline { bits, .. } => std::slice::from_ref(bits),
            Repr::Heap { words, .. } => words,
        }
    }

    fn word(&self, index: usize) -> u64 {
        match &self.repr {
            Repr::Inline { bits, .. } => {
                if index == 0 {
                    *bits
                } else {
                    0
                }
            }
            Repr::Heap { words, .. } => words.get(index).copied().unwrap_or(0),
        }
    }

    /// Declared width in bits.
    #[must_use]
    pub const fn width(&self) -> usize {
        match &self.repr {
            Repr::Inline { width, .. } | Repr::Heap { width, .. } => *width,
        }
    }

    /// Returns `true` when the vector uses the single-word representation.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    fn check_index(&self, pos: usize) {
        assert!(
            pos < self.width(),
            "bit index {pos} out of range for width {}",
            self.width()
        );
    }

    /// Returns the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is not below the declared width.
    #[must_use]
    pub fn test(&self, pos: usize) -> bool {
        self.check_index(pos);
        (self.word(pos / WORD_BITS) >> (pos % WORD_BITS)) & 1 == 1
    }

    fn update_word(&mut self, index: usize, f: impl FnOnce(u64) -> u64) {
        match &mut self.repr {
            Repr::Inline { width, bits } => *bits = f(*bits) & low_mask(*width),
            Repr::Heap { width, words } => {
                words[index] = f(words[index]);
                let last = words.len() - 1;
                let used = *width % WORD_BITS;
                if index == last && used != 0 {
                    words[last] &= low_mask(used);
                }
            }
        }
    }

    /// Writes `value` into the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is not below the declared width.
    pub fn set_to(&mut self, pos: usize, value: bool) -> &mut Self {
        self.check_index(pos);
        let bit = 1u64 << (pos % WORD_BITS);
        self.update_word(pos / WORD_BITS, |word| {
            if value {
                word | bit
            } else {
                word & !bit
            }
        });
        self
    }

    /// Sets the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is not below the declared width.
    pub fn set(&mut self, pos: usize) -> &mut Self {
        self.set_to(pos, true)
    }

    /// Clears the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is not below the declared width.
    pub fn reset(&mut self, pos: usize) -> &mut Self {
        self.set_to(pos, false)
    }

    /// Inverts the bit at `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is not below the declared width.
    pub fn flip(&mut self, pos: usize) -> &mut Self {
        self.check_index(pos);
        let bit = 1u64 << (pos % WORD_BITS);
        self.update_word(pos / WORD_BITS, |word| word ^ bit);
        self
    }

    /// Sets every bit.
    pub fn set_all(&mut self) -> &mut Self {
        let width = self.width();
        *self = if width <= INLINE_WIDTH {
            Self::inline(width, u64::MAX)
        } else {
            Self::from_words(width, vec![u64::MAX; words_for(width)])
        };
        self
    }

    /// Clears every bit.
    pub fn reset_all(&mut self) -> &mut Self {
        *self = Self::new(self.width());
        self
    }

    /// Inverts every bit.
    pub fn flip_all(&mut self) -> &mut Self {
        match &mut self.repr {
            Repr::Inline { width, bits } => *bits = !*bits & low_mask(*width),
            Repr::Heap { width, words } => {
                for word in words.iter_mut() {
                    *word = !*word;
                }
                let used = *width % WORD_BITS;
                if let Some(last) = words.last_mut().filter(|_| used != 0) {
                    *last &= low_mask(used);
                }
            }
        }
        self
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        match &self.repr {
            Repr::Inline { bits, .. } => bits.count_ones() as usize,
            Repr::Heap { words, .. } => words.iter().map(|word| word.count_ones() as usize).sum(),
        }
    }

    /// Returns `true` when every bit is set (vacuously true for width zero).
    #[must_use]
    pub fn all(&self) -> bool {
        self.count_ones() == self.width()
    }

    /// Returns `true` when at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        match &self.repr {
            Repr::Inline { bits, .. } => *bits != 0,
            Repr::Heap { words, .. } => words.iter().any(|word| *word != 0),
        }
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Changes the width, truncating high bits or zero-extending.
    ///
    /// Crossing [`INLINE_WIDTH`] migrates between representations while
    /// preserving the value that still fits.
    pub fn resize(&mut self, width: usize) -> &mut Self {
        *self = if width <= INLINE_WIDTH {
            Self::inline(width, self.word(0))
        } else {
            Self::from_words(width, self.words().to_vec())
        };
        self
    }

    /// Appends `low` below the current bits; `self` becomes the high part.
    pub fn concat(&mut self, low: &Self) -> &mut Self {
        let width = self.width() + low.width();
        if width <= INLINE_WIDTH {
            *self = Self::inline(width, shl_word(self.word(0), low.width()) | low.word(0));
            return self;
        }
        let mut words = shifted_left(self.words(), low.width(), words_for(width));
        for (index, word) in low.words().iter().enumerate() {
            words[index] |= word;
        }
        *self = Self::from_words(width, words);
        self
    }

    /// Rotates right by `amount` bits within the declared width.
    #[must_use]
    pub fn rotate_right(&self, amount: usize) -> Self {
        let width = self.width();
        if width == 0 {
            return self.clone();
        }
        let amount = amount % width;
        if amount == 0 {
            return self.clone();
        }
        let mut rotated = self >> amount;
        rotated |= &(self << (width - amount));
        rotated
    }

    /// Repeats the vector `count` times (the original occupies the low bits).
    #[must_use]
    pub fn replicate(&self, count: usize) -> Self {
        let mut out = Self::new(0);
        for _ in 0..count {
            out.concat(self);
        }
        out
    }

    /// Converts to `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`BitVectorError::TooWide`] when the declared width exceeds 32.
    pub fn to_u32(&self) -> Result<u32, BitVectorError> {
        let width = self.width();
        if width > 32 {
            return Err(BitVectorError::TooWide { width, target: 32 });
        }
        u32::try_from(self.word(0)).map_err(|_| BitVectorError::TooWide { width, target: 32 })
    }

    /// Converts to `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`BitVectorError::TooWide`] when the declared width exceeds 64.
    pub fn to_u64(&self) -> Result<u64, BitVectorError> {
        let width = self.width();
        if width > INLINE_WIDTH {
            return Err(BitVectorError::TooWide { width, target: 64 });
        }
        Ok(self.word(0))
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        let width = self.width().max(rhs.width());
        if width <= INLINE_WIDTH {
            return Self::inline(width, op(self.word(0), rhs.word(0)));
        }
        let words = (0..words_for(width))
            .map(|index| op(self.word(index), rhs.word(index)))
            .collect();
        Self::from_words(width, words)
    }

    fn significant_words(&self) -> &[u64] {
        trim_zeros(self.words())
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.significant_words() == other.significant_words()
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = words_for(self.width().max(other.width()));
        (0..len)
            .rev()
            .map(|index| self.word(index).cmp(&other.word(index)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq<u64> for BitVector {
    fn eq(&self, other: &u64) -> bool {
        self.significant_words() == trim_zeros(std::slice::from_ref(other))
    }
}

impl Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        let mut out = self.clone();
        out.flip_all();
        out
    }
}

impl Not for BitVector {
    type Output = Self;

    fn not(mut self) -> Self {
        self.flip_all();
        self
    }
}

impl Shl<usize> for &BitVector {
    type Output = BitVector;

    fn shl(self, amount: usize) -> BitVector {
        let width = self.width();
        if let Repr::Inline { bits, .. } = self.repr {
            return BitVector::inline(width, shl_word(bits, amount));
        }
        BitVector::from_words(width, shifted_left(self.words(), amount, words_for(width)))
    }
}

impl Shr<usize> for &BitVector {
    type Output = BitVector;

    fn shr(self, amount: usize) -> BitVector {
        let width = self.width();
        if let Repr::Inline { bits, .. } = self.repr {
            return BitVector::inline(width, shr_word(bits, amount));
        }
        BitVector::from_words(width, shifted_right(self.words(), amount, words_for(width)))
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for &BitVector {
            type Output = BitVector;

            fn $method(self, rhs: Self) -> BitVector {
                self.zip_with(rhs, |lhs, rhs| lhs $op rhs)
            }
        }

        impl $assign_trait<&BitVector> for BitVector {
            fn $assign_method(&mut self, rhs: &BitVector) {
                *self = self.zip_with(rhs, |lhs, rhs| lhs $op rhs);
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in (0..self.width()).rev() {
            f.write_str(if self.test(pos) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitVector {
    type Err = BitVectorError;

    /// Parses a string of binary digits, most-significant bit first.
    fn from_str(digits: &str) -> Result<Self, Self::Err> {
        let width = digits.chars().count();
        let mut out = Self::new(width);
        for (pos, digit) in digits.chars().rev().enumerate() {
            match digit {
                '0' => {}
                '1' => {
                    out.set(pos);
                }
                other => return Err(BitVectorError::InvalidDigit(other)),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{BitVector, BitVectorError, INLINE_WIDTH};

    #[test]
    fn width_selects_representation() {
        assert!(BitVector::new(0).is_inline());
        assert!(BitVector::new(INLINE_WIDTH).is_inline());
        assert!(!BitVector::new(INLINE_WIDTH + 1).is_inline());
    }

    #[test]
    fn from_u64_truncates_to_width() {
        let bits = BitVector::from_u64(4, 0xFF);
        assert_eq!(bits.to_u64(), Ok(0xF));
        assert_eq!(bits.count_ones(), 4);
        assert!(bits.all());
    }

    #[test]
    fn set_reset_flip_touch_one_bit() {
        let mut bits = BitVector::new(100);
        bits.set(99).set(0).flip(3).reset(0);
        assert!(bits.test(99));
        assert!(bits.test(3));
        assert!(!bits.test(0));
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_beyond_width_panics() {
        let _ = BitVector::new(8).test(8);
    }

    #[test]
    fn resize_migrates_between_representations() {
        let mut bits = BitVector::from_u64(64, 0xDEAD_BEEF_0000_0001);
        bits.resize(130);
        assert!(!bits.is_inline());
        assert!(bits.test(0));
        bits.set(129);
        bits.resize(64);
        assert!(bits.is_inline());
        assert_eq!(bits.to_u64(), Ok(0xDEAD_BEEF_0000_0001));
    }

    #[test]
    fn concat_places_self_in_high_bits() {
        let mut high = BitVector::from_u64(3, 0b101);
        high.concat(&BitVector::from_u64(2, 0b01));
        assert_eq!(high.width(), 5);
        assert_eq!(high.to_u64(), Ok(0b10101));
    }

    #[test]
    fn concat_across_word_boundary_keeps_every_bit() {
        let mut high = BitVector::from_u64(40, 0xAB_CDEF_0123);
        high.concat(&BitVector::from_u64(40, 0x12_3456_789A));
        assert_eq!(high.width(), 80);
        let low_half = &high & &BitVector::from_u64(40, u64::MAX);
        assert_eq!(low_half, BitVector::from_u64(40, 0x12_3456_789A));
        let high_half = &high >> 40;
        assert_eq!(high_half, BitVector::from_u64(40, 0xAB_CDEF_0123));
    }

    #[test]
    fn mixed_width_ops_zero_extend_the_narrow_side() {
        let narrow = BitVector::from_u64(8, 0xF0);
        let mut wide = BitVector::new(96);
        wide.set_all();
        let and = &narrow & &wide;
        assert_eq!(and.width(), 96);
        assert_eq!(and, BitVector::from_u64(8, 0xF0));
        let or = &narrow | &BitVector::from_u64(4, 0x3);
        assert_eq!(or.to_u64(), Ok(0xF3));
    }

    #[test]
    fn heap_and_assign_uses_the_right_operand() {
        let mut lhs = BitVector::new(128);
        lhs.set_all();
        let mut rhs = BitVector::new(128);
        rhs.set(5).set(127);
        lhs &= &rhs;
        assert_eq!(lhs.count_ones(), 2);
        assert!(lhs.test(5) && lhs.test(127));

        let mut lhs = BitVector::new(128);
        lhs |= &rhs;
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn equality_ignores_width_padding() {
        assert_eq!(BitVector::from_u64(4, 5), BitVector::from_u64(100, 5));
        assert_ne!(BitVector::from_u64(4, 5), BitVector::from_u64(4, 4));
        assert_eq!(BitVector::from_u64(12, 7), 7u64);
    }

    #[test]
    fn shifts_drop_bits_outside_width() {
        let bits = BitVector::from_u64(8, 0b1000_0001);
        assert_eq!((&bits << 1).to_u64(), Ok(0b0000_0010));
        assert_eq!((&bits >> 7).to_u64(), Ok(1));
        assert_eq!((&bits << 8).to_u64(), Ok(0));
    }

    #[test]
    fn rotate_and_replicate_build_patterns() {
        let element = BitVector::from_u64(8, 0b0000_0111);
        assert_eq!(element.rotate_right(1).to_u64(), Ok(0b1000_0011));
        let pattern = element.replicate(4);
        assert_eq!(pattern.width(), 32);
        assert_eq!(pattern.to_u32(), Ok(0x0707_0707));
    }

    #[test]
    fn not_respects_width() {
        let bits = !BitVector::from_u64(70, 0);
        assert_eq!(bits.count_ones(), 70);
    }

    #[test]
    fn conversions_fail_when_width_exceeds_target() {
        assert_eq!(
            BitVector::new(33).to_u32(),
            Err(BitVectorError::TooWide {
                width: 33,
                target: 32
            })
        );
        assert_eq!(
            BitVector::new(65).to_u64(),
            Err(BitVectorError::TooWide {
                width: 65,
                target: 64
            })
        );
    }

    #[test]
    fn display_and_parse_agree() {
        let bits: BitVector = "0010110".parse().expect("valid binary digits");
        assert_eq!(bits.width(), 7);
        assert_eq!(bits.to_u64(), Ok(0b10110));
        assert_eq!(bits.to_string(), "0010110");
        assert_eq!(
            "10x".parse::<BitVector>(),
            Err(BitVectorError::InvalidDigit('x'))
        );
    }

    #[test]
    fn narrow_operations_stay_inline() {
        let a = BitVector::from_u64(16, 0xF0F0);
        let b = BitVector::from_u64(8, 0xFF);
        let results = [
            &a & &b,
            &a | &b,
            &a ^ &b,
            !&a,
            &a << 4,
            &a >> 4,
            a.rotate_right(3),
            b.replicate(8),
        ];
        assert!(results.iter().all(BitVector::is_inline));
        assert_eq!(results[0].to_u64(), Ok(0xF0));
        assert_eq!(results[4].to_u64(), Ok(0x0F00));
        assert_eq!(results[7].to_u64(), Ok(u64::MAX));

        let mut joined = a.clone();
        joined.concat(&b).flip_all().resize(40);
        assert!(joined.is_inline());
        assert_eq!(joined.to_u64(), Ok(0x0F_0F00));

        let mut wide = a.clone();
        wide.resize(200);
        assert_eq!(wide, a);
        assert!(a == 0xF0F0);
    }
}

//! Arithmetic helpers shared by the instruction implementations.

use crate::bitvec::BitVector;
use crate::fault::FaultCode;
use crate::state::Nzcv;

/// Operand size selected by the `sf` bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandWidth {
    /// 32-bit `W` registers.
    W32,
    /// 64-bit `X` registers.
    W64,
}

impl OperandWidth {
    /// Width for an `sf` bit.
    #[must_use]
    pub const fn from_sf(sf: bool) -> Self {
        if sf {
            Self::W64
        } else {
            Self::W32
        }
    }

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        match self {
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }

    /// All-ones mask of this width.
    #[must_use]
    pub const fn mask(self) -> u64 {
        ones(self.bits())
    }

    /// Truncates `value` to this width.
    #[must_use]
    pub const fn truncate(self, value: u64) -> u64 {
        value & self.mask()
    }
}

/// Shift applied to the second register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftType {
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
    /// Rotate right.
    Ror,
}

impl ShiftType {
    /// Decodes a two-bit `shift` field.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            _ => Self::Ror,
        }
    }
}

/// Value with the low `count` bits set.
#[must_use]
pub const fn ones(count: u32) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

/// Extracts `width` bits of `word` starting at `offset`.
#[must_use]
pub const fn bits(word: u32, offset: u32, width: u32) -> u32 {
    (word >> offset) & ((1u32 << width) - 1)
}

/// Sign-extends the low `bits` bits of `value` to 64 bits.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub const fn sign_extend(value: u64, bits: u32) -> u64 {
    if bits == 0 || bits >= 64 {
        return value;
    }
    let shift = 64 - bits;
    (((value << shift) as i64) >> shift) as u64
}

/// `x + y + carry` at `width`, returning the truncated result and its flags.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn add_with_carry(x: u64, y: u64, carry: bool, width: OperandWidth) -> (u64, Nzcv) {
    let x = width.truncate(x);
    let y = width.truncate(y);
    let unsigned_sum = u128::from(x) + u128::from(y) + u128::from(carry);
    let result = width.truncate(unsigned_sum as u64);
    let signed_x = sign_extend(x, width.bits()) as i64;
    let signed_y = sign_extend(y, width.bits()) as i64;
    let signed_sum = i128::from(signed_x) + i128::from(signed_y) + i128::from(carry);
    let signed_result = sign_extend(result, width.bits()) as i64;
    let flags = Nzcv {
        n: (result >> (width.bits() - 1)) & 1 == 1,
        z: result == 0,
        c: unsigned_sum != u128::from(result),
        v: signed_sum != i128::from(signed_result),
    };
    (result, flags)
}

/// Applies `shift` by `amount` to `value` at `width`; `amount` is taken modulo the width.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub const fn shift_value(value: u64, shift: ShiftType, amount: u32, width: OperandWidth) -> u64 {
    let value = width.truncate(value);
    let amount = amount % width.bits();
    if amount == 0 {
        return value;
    }
    let shifted = match shift {
        ShiftType::Lsl => value << amount,
        ShiftType::Lsr => value >> amount,
        ShiftType::Asr => (sign_extend(value, width.bits()) as i64 >> amount) as u64,
        ShiftType::Ror => (value >> amount) | (value << (width.bits() - amount)),
    };
    width.truncate(shifted)
}

/// Decodes the `N:immr:imms` bit-mask immediate into `(wmask, tmask)`.
///
/// `immediate` selects the logical-immediate rules, where an all-ones
/// element pattern is reserved.
///
/// # Errors
///
/// Returns [`FaultCode::UndefinedInstruction`] for reserved encodings and for
/// element sizes wider than `width`.
pub fn decode_bit_masks(
    n: bool,
    imms: u32,
    immr: u32,
    immediate: bool,
    width: OperandWidth,
) -> Result<(u64, u64), FaultCode> {
    let combined = (u32::from(n) << 6) | (!imms & 0x3F);
    if combined == 0 {
        return Err(FaultCode::UndefinedInstruction);
    }
    let len = 31 - combined.leading_zeros();
    if len < 1 || (1u32 << len) > width.bits() {
        return Err(FaultCode::UndefinedInstruction);
    }
    let levels = (1u32 << len) - 1;
    if immediate && imms & levels == levels {
        return Err(FaultCode::UndefinedInstruction);
    }

    let esize = 1usize << len;
    let s = imms & levels;
    let r = immr & levels;
    let d = s.wrapping_sub(r) & levels;
    let copies = width.bits() as usize / esize;

    let welem = BitVector::from_u64(esize, ones(s + 1));
    let telem = BitVector::from_u64(esize, ones(d + 1));
    let wmask = welem.rotate_right(r as usize).replicate(copies);
    let tmask = telem.replicate(copies);
    let to_u64 = |mask: BitVector| mask.to_u64().map_err(|_| FaultCode::UndefinedInstruction);
    Ok((to_u64(wmask)?, to_u64(tmask)?))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        add_with_carry, decode_bit_masks, shift_value, sign_extend, OperandWidth, ShiftType,
    };
    use crate::fault::FaultCode;
    use crate::state::Nzcv;

    #[test]
    fn sign_extension_respects_source_width() {
        assert_eq!(sign_extend(0x1F_FFFF, 21), u64::MAX);
        assert_eq!(sign_extend(0x0F_FFFF, 21), 0x0F_FFFF);
        assert_eq!(sign_extend(0x80, 8), 0xFFFF_FFFF_FFFF_FF80);
        assert_eq!(sign_extend(42, 64), 42);
    }

    #[rstest]
    #[case(5, !3u64, true, OperandWidth::W32, 2, 0b0010)]
    #[case(3, !3u64, true, OperandWidth::W32, 0, 0b0110)]
    #[case(3, !5u64, true, OperandWidth::W32, 0xFFFF_FFFE, 0b1000)]
    #[case(0x7FFF_FFFF, 1, false, OperandWidth::W32, 0x8000_0000, 0b1001)]
    #[case(u64::MAX, 1, false, OperandWidth::W64, 0, 0b0110)]
    #[case(0x8000_0000_0000_0000, !1u64, true, OperandWidth::W64, 0x7FFF_FFFF_FFFF_FFFF, 0b0011)]
    fn add_with_carry_sets_arm_flags(
        #[case] x: u64,
        #[case] y: u64,
        #[case] carry: bool,
        #[case] width: OperandWidth,
        #[case] result: u64,
        #[case] flags: u8,
    ) {
        assert_eq!(
            add_with_carry(x, y, carry, width),
            (result, Nzcv::from_bits(flags))
        );
    }

    #[test]
    fn shifts_truncate_to_width() {
        assert_eq!(
            shift_value(0x8000_0001, ShiftType::Lsl, 1, OperandWidth::W32),
            2
        );
        assert_eq!(
            shift_value(0x8000_0000, ShiftType::Asr, 4, OperandWidth::W32),
            0xF800_0000
        );
        assert_eq!(shift_value(1, ShiftType::Ror, 1, OperandWidth::W64), 1 << 63);
        assert_eq!(shift_value(0xF0, ShiftType::Lsr, 68, OperandWidth::W64), 0xF);
    }

    #[rstest]
    // ORR w0, wzr, #0xff
    #[case(false, 0b000111, 0, OperandWidth::W32, 0xFF)]
    // AND x0, x0, #0xfffffffffffffff0
    #[case(true, 0b111011, 0b111100, OperandWidth::W64, 0xFFFF_FFFF_FFFF_FFF0)]
    // ORR w0, wzr, #0x55555555
    #[case(false, 0b111100, 0, OperandWidth::W32, 0x5555_5555)]
    // EOR x0, x0, #0x8000000000000000
    #[case(true, 0, 1, OperandWidth::W64, 0x8000_0000_0000_0000)]
    fn logical_immediates_expand(
        #[case] n: bool,
        #[case] imms: u32,
        #[case] immr: u32,
        #[case] width: OperandWidth,
        #[case] expected: u64,
    ) {
        let (wmask, _) = decode_bit_masks(n, imms, immr, true, width).expect("valid immediate");
        assert_eq!(wmask, expected);
    }

    #[test]
    fn bitfield_masks_for_lsr_alias() {
        // UBFM w0, w1, #4, #31 is LSR w0, w1, #4
        let (wmask, tmask) =
            decode_bit_masks(false, 31, 4, false, OperandWidth::W32).expect("valid bitfield");
        assert_eq!(wmask, 0xFFFF_FFFF);
        assert_eq!(tmask, 0x0FFF_FFFF);
    }

    #[test]
    fn reserved_patterns_are_undefined() {
        assert_eq!(
            decode_bit_masks(false, 0b111111, 0, true, OperandWidth::W32),
            Err(FaultCode::UndefinedInstruction)
        );
        assert_eq!(
            decode_bit_masks(true, 0, 0, true, OperandWidth::W32),
            Err(FaultCode::UndefinedInstruction)
        );
    }
}

/// Number of general-purpose registers (`X0..X30`).
pub const GENERAL_REGISTER_COUNT: usize = 31;
/// Register number that encodes XZR or SP depending on the operand.
pub const ZERO_OR_SP: u8 = 31;
/// Link register number.
pub const LINK_REGISTER: u8 = 30;

/// Condition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Nzcv {
    /// Negative.
    pub n: bool,
    /// Zero.
    pub z: bool,
    /// Carry / not borrow.
    pub c: bool,
    /// Signed overflow.
    pub v: bool,
}

impl Nzcv {
    /// Builds flags from the 4-bit `NZCV` encoding (N in bit 3).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            n: bits & 0b1000 != 0,
            z: bits & 0b0100 != 0,
            c: bits & 0b0010 != 0,
            v: bits & 0b0001 != 0,
        }
    }

    /// Returns the 4-bit `NZCV` encoding.
    #[must_use]
    pub const fn bits(self) -> u8 {
        (self.n as u8) << 3 | (self.z as u8) << 2 | (self.c as u8) << 1 | self.v as u8
    }
}

/// Exception level selecting the banked stack pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum ExceptionLevel {
    #[default]
    El0 = 0,
    El1 = 1,
    El2 = 2,
    El3 = 3,
}

impl ExceptionLevel {
    /// Every level in ascending order.
    pub const ALL: [Self; 4] = [Self::El0, Self::El1, Self::El2, Self::El3];

    const fn index(self) -> usize {
        self as usize
    }
}

/// A64 register file of one processing unit.
///
/// Register number 31 reads as zero and discards writes through
/// [`RegisterFile::gpr`]/[`RegisterFile::set_gpr`], and selects the current
/// stack pointer through the `_or_sp` accessors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    x: [u64; GENERAL_REGISTER_COUNT],
    pc: u64,
    sp: [u64; 4],
    el: ExceptionLevel,
    nzcv: Nzcv,
}

impl RegisterFile {
    /// Reads `Xn`, with 31 as XZR.
    #[must_use]
    pub const fn gpr(&self, n: u8) -> u64 {
        if n >= ZERO_OR_SP {
            0
        } else {
            self.x[n as usize]
        }
    }

    /// Writes `Xn`; writes to 31 are discarded.
    pub const fn set_gpr(&mut self, n: u8, value: u64) {
        if n < ZERO_OR_SP {
            self.x[n as usize] = value;
        }
    }

    /// Reads `Xn`, with 31 as the current SP.
    #[must_use]
    pub const fn gpr_or_sp(&self, n: u8) -> u64 {
        if n >= ZERO_OR_SP {
            self.sp()
        } else {
            self.x[n as usize]
        }
    }

    /// Writes `Xn`, with 31 as the current SP.
    pub const fn set_gpr_or_sp(&mut self, n: u8, value: u64) {
        if n >= ZERO_OR_SP {
            self.set_sp(value);
        } else {
            self.x[n as usize] = value;
        }
    }

    /// Returns `X0..X30`.
    #[must_use]
    pub const fn gprs(&self) -> [u64; GENERAL_REGISTER_COUNT] {
        self.x
    }

    /// Program counter (byte address).
    #[must_use]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u64) {
        self.pc = value;
    }

    /// Stack pointer of the current exception level.
    #[must_use]
    pub const fn sp(&self) -> u64 {
        self.sp[self.el.index()]
    }

    /// Writes the stack pointer of the current exception level.
    pub const fn set_sp(&mut self, value: u64) {
        self.sp[self.el.index()] = value;
    }

    /// Banked stack pointer of `el`.
    #[must_use]
    pub const fn sp_el(&self, el: ExceptionLevel) -> u64 {
        self.sp[el.index()]
    }

    /// Current exception level.
    #[must_use]
    pub const fn el(&self) -> ExceptionLevel {
        self.el
    }

    /// Switches the current exception level.
    pub const fn set_el(&mut self, el: ExceptionLevel) {
        self.el = el;
    }

    /// Condition flags.
    #[must_use]
    pub const fn nzcv(&self) -> Nzcv {
        self.nzcv
    }

    /// Writes the condition flags.
    pub const fn set_nzcv(&mut self, nzcv: Nzcv) {
        self.nzcv = nzcv;
    }
}

#[cfg(test)]
mod tests {
    use super::{ExceptionLevel, Nzcv, RegisterFile, LINK_REGISTER, ZERO_OR_SP};

    #[test]
    fn register_31_is_zero_for_data_operands() {
        let mut regs = RegisterFile::default();
        regs.set_sp(0x1000);
        regs.set_gpr(ZERO_OR_SP, 55);
        assert_eq!(regs.gpr(ZERO_OR_SP), 0);
        assert_eq!(regs.sp(), 0x1000);
    }

    #[test]
    fn register_31_is_sp_for_address_operands() {
        let mut regs = RegisterFile::default();
        regs.set_gpr_or_sp(ZERO_OR_SP, 0x2000);
        assert_eq!(regs.gpr_or_sp(ZERO_OR_SP), 0x2000);
        regs.set_gpr_or_sp(LINK_REGISTER, 7);
        assert_eq!(regs.gpr(LINK_REGISTER), 7);
    }

    #[test]
    fn stack_pointers_are_banked_per_level() {
        let mut regs = RegisterFile::default();
        regs.set_sp(10);
        regs.set_el(ExceptionLevel::El1);
        regs.set_sp(20);
        assert_eq!(regs.sp_el(ExceptionLevel::El0), 10);
        assert_eq!(regs.sp_el(ExceptionLevel::El1), 20);
        regs.set_el(ExceptionLevel::El0);
        assert_eq!(regs.sp(), 10);
    }

    #[test]
    fn nzcv_bits_roundtrip() {
        for bits in 0u8..16 {
            assert_eq!(Nzcv::from_bits(bits).bits(), bits);
        }
        assert!(Nzcv::from_bits(0b0100).z);
    }
}

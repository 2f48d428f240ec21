//! Condition flag updates and condition-code evaluation.

use crate::state::Nzcv;

/// Describes how NZCV should change after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// No change to NZCV.
    #[default]
    None,
    /// Replace NZCV with the given flags.
    Set(Nzcv),
}

impl FlagsUpdate {
    /// Flags for a logical result: N and Z from the value, C and V cleared.
    #[must_use]
    pub const fn logical(result: u64, width_bits: u32) -> Self {
        Self::Set(Nzcv {
            n: (result >> (width_bits - 1)) & 1 == 1,
            z: result == 0,
            c: false,
            v: false,
        })
    }
}

/// A64 condition codes as encoded in `cond` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Condition {
    Eq,
    Ne,
    Cs,
    Cc,
    Mi,
    Pl,
    Vs,
    Vc,
    Hi,
    Ls,
    Ge,
    Lt,
    Gt,
    Le,
    Al,
    Nv,
}

impl Condition {
    const ALL: [Self; 16] = [
        Self::Eq,
        Self::Ne,
        Self::Cs,
        Self::Cc,
        Self::Mi,
        Self::Pl,
        Self::Vs,
        Self::Vc,
        Self::Hi,
        Self::Ls,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Al,
        Self::Nv,
    ];

    /// Decodes the low four bits of `bits`.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self::ALL[(bits & 0xF) as usize]
    }

    /// Evaluates the condition against `flags`.
    #[must_use]
    pub const fn holds(self, flags: Nzcv) -> bool {
        match self {
            Self::Eq => flags.z,
            Self::Ne => !flags.z,
            Self::Cs => flags.c,
            Self::Cc => !flags.c,
            Self::Mi => flags.n,
            Self::Pl => !flags.n,
            Self::Vs => flags.v,
            Self::Vc => !flags.v,
            Self::Hi => flags.c && !flags.z,
            Self::Ls => !(flags.c && !flags.z),
            Self::Ge => flags.n == flags.v,
            Self::Lt => flags.n != flags.v,
            Self::Gt => flags.n == flags.v && !flags.z,
            Self::Le => !(flags.n == flags.v && !flags.z),
            // NV behaves as AL in A64.
            Self::Al | Self::Nv => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, FlagsUpdate};
    use crate::state::Nzcv;

    #[test]
    fn inverse_pairs_disagree() {
        for bits in 0u8..16 {
            let flags = Nzcv::from_bits(bits);
            for cond in (0..14).step_by(2) {
                assert_ne!(
                    Condition::from_bits(cond).holds(flags),
                    Condition::from_bits(cond + 1).holds(flags),
                    "cond {cond} flags {bits:04b}"
                );
            }
            assert!(Condition::Al.holds(flags));
            assert!(Condition::Nv.holds(flags));
        }
    }

    #[test]
    fn signed_comparisons_follow_n_and_v() {
        let less = Nzcv::from_bits(0b1000);
        assert!(Condition::Lt.holds(less));
        assert!(!Condition::Ge.holds(less));
        let equal = Nzcv::from_bits(0b0110);
        assert!(Condition::Le.holds(equal));
        assert!(!Condition::Gt.holds(equal));
        assert!(!Condition::Hi.holds(equal));
    }

    #[test]
    fn logical_flags_clear_carry_and_overflow() {
        assert_eq!(
            FlagsUpdate::logical(0x8000_0000, 32),
            FlagsUpdate::Set(Nzcv {
                n: true,
                z: false,
                c: false,
                v: false
            })
        );
        assert_eq!(
            FlagsUpdate::logical(0, 64),
            FlagsUpdate::Set(Nzcv::from_bits(0b0100))
        );
    }
}

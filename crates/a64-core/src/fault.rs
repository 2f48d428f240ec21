use thiserror::Error;

/// Fault classes used for diagnostics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// No decode table entry (or no implementation) for the fetched word.
    Decode,
    /// Instruction was recognised but its operands are architecturally unusable.
    Execute,
    /// Data access outside the unit's addressable range or misaligned.
    Memory,
}

/// Stable fault taxonomy raised while retiring an instruction.
///
/// A fault ends the program that raised it and is attached to its result
/// handle. It never takes down the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// The word matched no decode table entry at some level.
    #[error("undefined instruction")]
    UndefinedInstruction = 0x01,
    /// The word decodes to a known mnemonic that has no execution semantics here.
    #[error("instruction is not implemented")]
    UnsupportedInstruction = 0x02,
    /// A constrained-unpredictable encoding (for example a mismatching size field).
    #[error("instruction has undefined behaviour")]
    UndefinedBehaviour = 0x03,
    /// An encoding selected a register that the instruction cannot address.
    #[error("undefined register access")]
    UndefinedRegisterAccess = 0x04,
    /// A load or store targeted an address outside every mapped memory.
    #[error("data access outside addressable memory")]
    DataAbort = 0x05,
    /// A load or store used an address that is not word aligned.
    #[error("unaligned data access")]
    UnalignedAccess = 0x06,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::UndefinedInstruction),
            0x02 => Some(Self::UnsupportedInstruction),
            0x03 => Some(Self::UndefinedBehaviour),
            0x04 => Some(Self::UndefinedRegisterAccess),
            0x05 => Some(Self::DataAbort),
            0x06 => Some(Self::UnalignedAccess),
            _ => None,
        }
    }

    /// Returns the diagnostics fault class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::UndefinedInstruction | Self::UnsupportedInstruction => FaultClass::Decode,
            Self::UndefinedBehaviour | Self::UndefinedRegisterAccess => FaultClass::Execute,
            Self::DataAbort | Self::UnalignedAccess => FaultClass::Memory,
        }
    }
}

//! Three-level A64 decode pipeline.
//!
//! A word is classified into its top-level group, then its encoding class,
//! then its mnemonic. Falling through any level yields a typed decode fault
//! instead of a silently ignored word.

use crate::encoding::{
    classify_class, classify_group, DecodeGroup, InstructionClass, Mnemonic,
};
use crate::fault::FaultCode;
use crate::instruction::Instruction;

/// Fully classified instruction ready for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DecodedInstruction {
    /// Raw opcode word.
    pub word: u32,
    /// Top-level encoding group.
    pub group: DecodeGroup,
    /// Encoding class inside the group.
    pub class: InstructionClass,
    /// Mnemonic inside the class.
    pub mnemonic: Mnemonic,
}

impl DecodedInstruction {
    /// Returns the opcode as an [`Instruction`] for field extraction.
    #[must_use]
    pub const fn instruction(self) -> Instruction {
        Instruction::new(self.word)
    }
}

/// Decode level at which classification stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DecodeLevel {
    /// Top-level group lookup.
    Group,
    /// Class lookup inside the group.
    Class,
    /// Mnemonic lookup inside the class.
    Mnemonic,
}

/// Why a word failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DecodeFaultCause {
    /// The table at this level exists and no entry matched.
    Undefined,
    /// The word is recognised up to this level but no table below it is implemented.
    Unsupported,
}

/// Decode failure with the level it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DecodeFault {
    /// Raw opcode word.
    pub word: u32,
    /// Level where classification stopped.
    pub level: DecodeLevel,
    /// Failure cause.
    pub cause: DecodeFaultCause,
    /// Group reached before the failure, if any.
    pub group: Option<DecodeGroup>,
    /// Class reached before the failure, if any.
    pub class: Option<InstructionClass>,
}

impl DecodeFault {
    /// Returns the execution fault this decode failure raises.
    #[must_use]
    pub const fn code(self) -> FaultCode {
        match self.cause {
            DecodeFaultCause::Undefined => FaultCode::UndefinedInstruction,
            DecodeFaultCause::Unsupported => FaultCode::UnsupportedInstruction,
        }
    }
}

/// Result of a decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedOrFault {
    /// Successfully decoded instruction.
    Instruction(DecodedInstruction),
    /// Decoding failed with a fault.
    Fault(DecodeFault),
}

impl DecodedOrFault {
    /// Returns the decoded instruction if present.
    #[must_use]
    pub const fn instruction(self) -> Option<DecodedInstruction> {
        match self {
            Self::Instruction(i) => Some(i),
            Self::Fault(_) => None,
        }
    }

    /// Returns the decode fault if decoding failed.
    #[must_use]
    pub const fn fault(self) -> Option<DecodeFault> {
        match self {
            Self::Instruction(_) => None,
            Self::Fault(f) => Some(f),
        }
    }
}

impl From<DecodedOrFault> for Result<DecodedInstruction, FaultCode> {
    fn from(value: DecodedOrFault) -> Self {
        match value {
            DecodedOrFault::Instruction(i) => Ok(i),
            DecodedOrFault::Fault(f) => Err(f.code()),
        }
    }
}

/// A64 instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes a 32-bit instruction word through all three table levels.
    #[must_use]
    pub fn decode(word: u32) -> DecodedOrFault {
        let fault = |level, cause, group, class| {
            DecodedOrFault::Fault(DecodeFault {
                word,
                level,
                cause,
                group,
                class,
            })
        };

        let Some(group) = classify_group(word) else {
            return fault(DecodeLevel::Group, DecodeFaultCause::Undefined, None, None);
        };
        if !group.is_supported() {
            return fault(
                DecodeLevel::Class,
                DecodeFaultCause::Unsupported,
                Some(group),
                None,
            );
        }

        let Some(class) = classify_class(group, word) else {
            return fault(
                DecodeLevel::Class,
                DecodeFaultCause::Undefined,
                Some(group),
                None,
            );
        };

        let Some(table) = class.mnemonic_table() else {
            return fault(
                DecodeLevel::Mnemonic,
                DecodeFaultCause::Unsupported,
                Some(group),
                Some(class),
            );
        };

        let Some(mnemonic) = table.lookup(word) else {
            return fault(
                DecodeLevel::Mnemonic,
                DecodeFaultCause::Undefined,
                Some(group),
                Some(class),
            );
        };

        DecodedOrFault::Instruction(DecodedInstruction {
            word,
            group,
            class,
            mnemonic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_nop() {
        let decoded = Decoder::decode(0xD503_201F).instruction().expect("NOP decodes");
        assert_eq!(decoded.group, DecodeGroup::BranchExceptionSystem);
        assert_eq!(decoded.class, InstructionClass::Hints);
        assert_eq!(decoded.mnemonic, Mnemonic::Nop);
    }

    #[test]
    fn decode_ret() {
        let decoded = Decoder::decode(0xD65F_03C0).instruction().expect("RET decodes");
        assert_eq!(decoded.class, InstructionClass::UnconditionalBranchRegister);
        assert_eq!(decoded.mnemonic, Mnemonic::Ret);
    }

    #[test]
    fn unallocated_group_is_undefined_at_group_level() {
        let fault = Decoder::decode(0b0001 << 25).fault().expect("fault");
        assert_eq!(fault.level, DecodeLevel::Group);
        assert_eq!(fault.code(), FaultCode::UndefinedInstruction);
    }

    #[test]
    fn sve_words_are_unsupported() {
        let fault = Decoder::decode(0x0420_0000).fault().expect("fault");
        assert_eq!(fault.group, Some(DecodeGroup::Sve));
        assert_eq!(fault.code(), FaultCode::UnsupportedInstruction);
    }

    #[test]
    fn reserved_nonzero_upper_half_is_undefined() {
        let fault = Decoder::decode(0x0001_0000).fault().expect("fault");
        assert_eq!(fault.level, DecodeLevel::Class);
        assert_eq!(fault.cause, DecodeFaultCause::Undefined);
    }

    #[test]
    fn udf_decodes_to_its_mnemonic() {
        let decoded = Decoder::decode(0x0000_1234).instruction().expect("UDF decodes");
        assert_eq!(decoded.mnemonic, Mnemonic::Udf);
    }

    #[test]
    fn class_without_mnemonic_table_is_unsupported() {
        // ADD v0.4s, v1.4s, v2.4s
        let fault = Decoder::decode(0x4EA2_8420).fault().expect("fault");
        assert_eq!(fault.class, Some(InstructionClass::SimdThreeSame));
        assert_eq!(fault.level, DecodeLevel::Mnemonic);
        assert_eq!(fault.cause, DecodeFaultCause::Unsupported);
    }

    #[test]
    fn class_table_miss_is_undefined() {
        // Move wide with opc = 01 is unallocated.
        let fault = Decoder::decode(0x1280_0000 | (0b01 << 29)).fault().expect("fault");
        assert_eq!(fault.class, Some(InstructionClass::MoveWideImmediate));
        assert_eq!(fault.cause, DecodeFaultCause::Undefined);
    }

    #[test]
    fn result_conversion_carries_fault_code() {
        let ok: Result<DecodedInstruction, FaultCode> = Decoder::decode(0xD503_201F).into();
        assert!(ok.is_ok());
        let err: Result<DecodedInstruction, FaultCode> = Decoder::decode(0x0420_0000).into();
        assert_eq!(err, Err(FaultCode::UnsupportedInstruction));
    }
}

//! Raw A64 instruction words and named bit-field extraction.

use crate::bitvec::BitVector;

/// Named bit fields of the A64 encoding, each a fixed `(offset, width)` slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Field {
    DecodeFields,
    Cond,
    Imm3,
    Imm5,
    Imm6,
    Imm7,
    Imm9,
    Imm12,
    Imm14,
    Imm16,
    Imm19,
    Imm26,
    ImmHi,
    ImmLo,
    Imms,
    Immr,
    UImm4,
    UImm6,
    Hw,
    Ra,
    Rd,
    Rm,
    Rn,
    Rt,
    Rt2,
    Sh,
    CRm,
    CRn,
    Size,
    Sf,
    Option,
    Shift,
    Nzcv,
    A,
    L,
    M,
    N,
    S,
    Z,
    Op1,
    Op2,
    Opc,
    O0,
    B5,
    B40,
}

/// Field registry: `(field, bit offset, width)`.
pub const FIELD_TABLE: &[(Field, u8, u8)] = &[
    (Field::DecodeFields, 25, 4),
    (Field::Cond, 0, 4),
    (Field::Imm3, 10, 3),
    (Field::Imm5, 16, 5),
    (Field::Imm6, 10, 6),
    (Field::Imm7, 15, 7),
    (Field::Imm9, 12, 9),
    (Field::Imm12, 10, 12),
    (Field::Imm14, 5, 14),
    (Field::Imm16, 5, 16),
    (Field::Imm19, 5, 19),
    (Field::Imm26, 0, 26),
    (Field::ImmHi, 5, 19),
    (Field::ImmLo, 29, 2),
    (Field::Imms, 10, 6),
    (Field::Immr, 16, 6),
    (Field::UImm4, 10, 4),
    (Field::UImm6, 16, 6),
    (Field::Hw, 21, 2),
    (Field::Ra, 10, 5),
    (Field::Rd, 0, 5),
    (Field::Rm, 16, 5),
    (Field::Rn, 5, 5),
    (Field::Rt, 0, 5),
    (Field::Rt2, 10, 5),
    (Field::Sh, 22, 1),
    (Field::CRm, 8, 4),
    (Field::CRn, 12, 4),
    (Field::Size, 30, 2),
    (Field::Sf, 31, 1),
    (Field::Option, 13, 3),
    (Field::Shift, 22, 2),
    (Field::Nzcv, 0, 4),
    (Field::A, 11, 1),
    (Field::L, 21, 1),
    (Field::M, 10, 1),
    (Field::N, 22, 1),
    (Field::S, 12, 1),
    (Field::Z, 24, 1),
    (Field::Op1, 16, 3),
    (Field::Op2, 5, 3),
    (Field::Opc, 22, 2),
    (Field::O0, 19, 1),
    (Field::B5, 31, 1),
    (Field::B40, 19, 5),
];

impl Field {
    /// Returns the `(offset, width)` pair registered for this field.
    #[must_use]
    pub fn layout(self) -> (u8, u8) {
        FIELD_TABLE
            .iter()
            .find_map(|(field, offset, width)| (*field == self).then_some((*offset, *width)))
            .unwrap_or((0, 0))
    }
}

/// Immutable 32-bit A64 opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Instruction(u32);

impl Instruction {
    /// Wraps a raw opcode word.
    #[must_use]
    pub const fn new(word: u32) -> Self {
        Self(word)
    }

    /// Returns the raw opcode word.
    #[must_use]
    pub const fn word(self) -> u32 {
        self.0
    }

    /// Extracts `field` as a plain integer.
    #[must_use]
    pub fn field_u32(self, field: Field) -> u32 {
        let (offset, width) = field.layout();
        (self.0 >> offset) & ((1u32 << width) - 1)
    }

    /// Extracts `field` as a bit vector of the field's declared width.
    #[must_use]
    pub fn field(self, field: Field) -> BitVector {
        let (_, width) = field.layout();
        BitVector::from_u64(usize::from(width), u64::from(self.field_u32(field)))
    }

    /// Returns the single bit at `pos`.
    #[must_use]
    pub const fn bit(self, pos: u32) -> bool {
        (self.0 >> pos) & 1 == 1
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        Self::new(word)
    }
}

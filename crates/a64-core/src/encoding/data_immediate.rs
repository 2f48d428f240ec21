use super::{DecodeEntry, DecodeTable, InstructionClass as C, Mnemonic as M};

pub(super) const CLASS_TABLE: DecodeTable<C> = DecodeTable::new(&[
    DecodeEntry::new(0x1F00_0000, 0x1000_0000, C::PcRelativeAddressing),
    DecodeEntry::new(0x1F80_0000, 0x1100_0000, C::AddSubtractImmediate),
    DecodeEntry::new(0x1F80_0000, 0x1180_0000, C::AddSubtractImmediateWithTags),
    DecodeEntry::new(0x1F80_0000, 0x1200_0000, C::LogicalImmediate),
    DecodeEntry::new(0x1F80_0000, 0x1280_0000, C::MoveWideImmediate),
    DecodeEntry::new(0x1F80_0000, 0x1300_0000, C::Bitfield),
    DecodeEntry::new(0x1F80_0000, 0x1380_0000, C::Extract),
]);

pub(super) const PC_RELATIVE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0x9F00_0000, 0x1000_0000, M::Adr),
    DecodeEntry::new(0x9F00_0000, 0x9000_0000, M::Adrp),
]);

pub(super) const ADD_SUB_IMMEDIATE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF80_0000, 0x1100_0000, M::AddImmW),
    DecodeEntry::new(0xFF80_0000, 0x3100_0000, M::AddsImmW),
    DecodeEntry::new(0xFF80_0000, 0x5100_0000, M::SubImmW),
    DecodeEntry::new(0xFF80_0000, 0x7100_0000, M::SubsImmW),
    DecodeEntry::new(0xFF80_0000, 0x9100_0000, M::AddImmX),
    DecodeEntry::new(0xFF80_0000, 0xB100_0000, M::AddsImmX),
    DecodeEntry::new(0xFF80_0000, 0xD100_0000, M::SubImmX),
    DecodeEntry::new(0xFF80_0000, 0xF100_0000, M::SubsImmX),
]);

pub(super) const ADD_SUB_TAGS_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFC0_0000, 0x9180_0000, M::Addg),
    DecodeEntry::new(0xFFC0_0000, 0xD180_0000, M::Subg),
]);

// The 32-bit forms require N == 0; the 64-bit forms accept either.
pub(super) const LOGICAL_IMMEDIATE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFC0_0000, 0x1200_0000, M::AndImmW),
    DecodeEntry::new(0xFFC0_0000, 0x3200_0000, M::OrrImmW),
    DecodeEntry::new(0xFFC0_0000, 0x5200_0000, M::EorImmW),
    DecodeEntry::new(0xFFC0_0000, 0x7200_0000, M::AndsImmW),
    DecodeEntry::new(0xFF80_0000, 0x9200_0000, M::AndImmX),
    DecodeEntry::new(0xFF80_0000, 0xB200_0000, M::OrrImmX),
    DecodeEntry::new(0xFF80_0000, 0xD200_0000, M::EorImmX),
    DecodeEntry::new(0xFF80_0000, 0xF200_0000, M::AndsImmX),
]);

pub(super) const MOVE_WIDE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFC0_0000, 0x1280_0000, M::MovnW),
    DecodeEntry::new(0xFFC0_0000, 0x5280_0000, M::MovzW),
    DecodeEntry::new(0xFFC0_0000, 0x7280_0000, M::MovkW),
    DecodeEntry::new(0xFF80_0000, 0x9280_0000, M::MovnX),
    DecodeEntry::new(0xFF80_0000, 0xD280_0000, M::MovzX),
    DecodeEntry::new(0xFF80_0000, 0xF280_0000, M::MovkX),
]);

pub(super) const BITFIELD_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFC0_0000, 0x1300_0000, M::SbfmW),
    DecodeEntry::new(0xFFC0_0000, 0x3300_0000, M::BfmW),
    DecodeEntry::new(0xFFC0_0000, 0x5300_0000, M::UbfmW),
    DecodeEntry::new(0xFFC0_0000, 0x9340_0000, M::SbfmX),
    DecodeEntry::new(0xFFC0_0000, 0xB340_0000, M::BfmX),
    DecodeEntry::new(0xFFC0_0000, 0xD340_0000, M::UbfmX),
]);

pub(super) const EXTRACT_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_8000, 0x1380_0000, M::ExtrW),
    DecodeEntry::new(0xFFE0_0000, 0x93C0_0000, M::ExtrX),
]);

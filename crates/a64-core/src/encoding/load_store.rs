use super::{DecodeEntry, DecodeTable, InstructionClass as C, Mnemonic as M};

pub(super) const CLASS_TABLE: DecodeTable<C> = DecodeTable::new(&[
    DecodeEntry::new(0xBFBF_0000, 0x0C00_0000, C::SimdLoadStoreMultiple),
    DecodeEntry::new(0xBFA0_0000, 0x0C80_0000, C::SimdLoadStoreMultiplePostIndexed),
    DecodeEntry::new(0xBF9F_0000, 0x0D00_0000, C::SimdLoadStoreSingle),
    DecodeEntry::new(0xBF80_0000, 0x0D80_0000, C::SimdLoadStoreSinglePostIndexed),
    DecodeEntry::new(0xFF20_0000, 0xD920_0000, C::LoadStoreMemoryTags),
    DecodeEntry::new(0x3F00_0000, 0x0800_0000, C::LoadStoreExclusive),
    DecodeEntry::new(0x3F20_0C00, 0x1900_0000, C::LdaprStlrUnscaledImmediate),
    DecodeEntry::new(0x3B00_0000, 0x1800_0000, C::LoadRegisterLiteral),
    DecodeEntry::new(0x3B80_0000, 0x2800_0000, C::LoadStoreNoAllocatePairOffset),
    DecodeEntry::new(0x3B80_0000, 0x2880_0000, C::LoadStorePairPostIndexed),
    DecodeEntry::new(0x3B80_0000, 0x2900_0000, C::LoadStorePairOffset),
    DecodeEntry::new(0x3B80_0000, 0x2980_0000, C::LoadStorePairPreIndexed),
    DecodeEntry::new(0x3B20_0C00, 0x3800_0000, C::LoadStoreUnscaledImmediate),
    DecodeEntry::new(0x3B20_0C00, 0x3800_0400, C::LoadStoreImmediatePostIndexed),
    DecodeEntry::new(0x3B20_0C00, 0x3800_0800, C::LoadStoreUnprivileged),
    DecodeEntry::new(0x3B20_0C00, 0x3800_0C00, C::LoadStoreImmediatePreIndexed),
    DecodeEntry::new(0x3B20_0C00, 0x3820_0000, C::AtomicMemoryOperations),
    DecodeEntry::new(0x3B20_0C00, 0x3820_0800, C::LoadStoreRegisterOffset),
    DecodeEntry::new(0x3B20_0400, 0x3820_0400, C::LoadStorePac),
    DecodeEntry::new(0x3B00_0000, 0x3900_0000, C::LoadStoreUnsignedImmediate),
]);

// Rows below are selected by `opc` (31..30) and `V` (26) only; the class
// lookup has already fixed every other opcode bit.
pub(super) const LITERAL_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xC400_0000, 0x0000_0000, M::LdrW),
    DecodeEntry::new(0xC400_0000, 0x4000_0000, M::LdrX),
    DecodeEntry::new(0xC400_0000, 0x8000_0000, M::Ldrsw),
    DecodeEntry::new(0xC400_0000, 0xC000_0000, M::Prfm),
    DecodeEntry::new(0xC400_0000, 0x0400_0000, M::LdrSimd),
    DecodeEntry::new(0xC400_0000, 0x4400_0000, M::LdrSimd),
    DecodeEntry::new(0xC400_0000, 0x8400_0000, M::LdrSimd),
]);

// Selected by `opc` (31..30), `V` (26) and `L` (22).
pub(super) const PAIR_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xC440_0000, 0x0000_0000, M::StpW),
    DecodeEntry::new(0xC440_0000, 0x0040_0000, M::LdpW),
    DecodeEntry::new(0xC440_0000, 0x4000_0000, M::Stgp),
    DecodeEntry::new(0xC440_0000, 0x4040_0000, M::Ldpsw),
    DecodeEntry::new(0xC440_0000, 0x8000_0000, M::StpX),
    DecodeEntry::new(0xC440_0000, 0x8040_0000, M::LdpX),
    DecodeEntry::new(0xC440_0000, 0x0400_0000, M::StpSimd),
    DecodeEntry::new(0xC440_0000, 0x0440_0000, M::LdpSimd),
    DecodeEntry::new(0xC440_0000, 0x4400_0000, M::StpSimd),
    DecodeEntry::new(0xC440_0000, 0x4440_0000, M::LdpSimd),
    DecodeEntry::new(0xC440_0000, 0x8400_0000, M::StpSimd),
    DecodeEntry::new(0xC440_0000, 0x8440_0000, M::LdpSimd),
]);

// Selected by `size` (31..30), `V` (26) and `opc` (23..22). Shared by the
// unsigned-offset, pre-indexed, post-indexed and register-offset classes.
pub(super) const REGISTER_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xC4C0_0000, 0x0000_0000, M::Strb),
    DecodeEntry::new(0xC4C0_0000, 0x0040_0000, M::Ldrb),
    DecodeEntry::new(0xC4C0_0000, 0x0080_0000, M::LdrsbX),
    DecodeEntry::new(0xC4C0_0000, 0x00C0_0000, M::LdrsbW),
    DecodeEntry::new(0xC4C0_0000, 0x0400_0000, M::StrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x0440_0000, M::LdrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x0480_0000, M::StrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x04C0_0000, M::LdrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x4000_0000, M::Strh),
    DecodeEntry::new(0xC4C0_0000, 0x4040_0000, M::Ldrh),
    DecodeEntry::new(0xC4C0_0000, 0x4080_0000, M::LdrshX),
    DecodeEntry::new(0xC4C0_0000, 0x40C0_0000, M::LdrshW),
    DecodeEntry::new(0xC4C0_0000, 0x4400_0000, M::StrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x4440_0000, M::LdrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x8000_0000, M::StrW),
    DecodeEntry::new(0xC4C0_0000, 0x8040_0000, M::LdrW),
    DecodeEntry::new(0xC4C0_0000, 0x8080_0000, M::Ldrsw),
    DecodeEntry::new(0xC4C0_0000, 0x8400_0000, M::StrSimd),
    DecodeEntry::new(0xC4C0_0000, 0x8440_0000, M::LdrSimd),
    DecodeEntry::new(0xC4C0_0000, 0xC000_0000, M::StrX),
    DecodeEntry::new(0xC4C0_0000, 0xC040_0000, M::LdrX),
    DecodeEntry::new(0xC4C0_0000, 0xC080_0000, M::Prfm),
    DecodeEntry::new(0xC4C0_0000, 0xC400_0000, M::StrSimd),
    DecodeEntry::new(0xC4C0_0000, 0xC440_0000, M::LdrSimd),
]);

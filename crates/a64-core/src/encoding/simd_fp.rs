use super::{DecodeEntry, DecodeTable, InstructionClass as C, Mnemonic as M};

// The trailing catch-all keeps every remaining advanced SIMD word recognised
// but unimplemented.
pub(super) const CLASS_TABLE: DecodeTable<C> = DecodeTable::new(&[
    DecodeEntry::new(0xFF3E_0C00, 0x4E28_0800, C::CryptographicAes),
    DecodeEntry::new(0x7F20_FC00, 0x1E20_0000, C::FloatingPointIntegerConversion),
    DecodeEntry::new(0xFF20_7C00, 0x1E20_4000, C::FloatingPointOneSource),
    DecodeEntry::new(0xFF20_3C00, 0x1E20_2000, C::FloatingPointCompare),
    DecodeEntry::new(0xFF20_1C00, 0x1E20_1000, C::FloatingPointImmediate),
    DecodeEntry::new(0xFF20_0C00, 0x1E20_0400, C::FloatingPointConditionalCompare),
    DecodeEntry::new(0xFF20_0C00, 0x1E20_0800, C::FloatingPointTwoSource),
    DecodeEntry::new(0xFF20_0C00, 0x1E20_0C00, C::FloatingPointConditionalSelect),
    DecodeEntry::new(0xFF00_0000, 0x1F00_0000, C::FloatingPointThreeSource),
    DecodeEntry::new(0x9FF8_0400, 0x0F00_0400, C::SimdModifiedImmediate),
    DecodeEntry::new(0x9FE0_8400, 0x0E00_0400, C::SimdCopy),
    DecodeEntry::new(0x9F3E_0C00, 0x0E30_0800, C::SimdAcrossLanes),
    DecodeEntry::new(0x9F3E_0C00, 0x0E20_0800, C::SimdTwoRegisterMisc),
    DecodeEntry::new(0x9F20_0400, 0x0E20_0400, C::SimdThreeSame),
    DecodeEntry::new(0x0000_0000, 0x0000_0000, C::SimdOther),
]);

pub(super) const CONVERSION_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_FC00, 0x1E26_0000, M::FmovToGeneral),
    DecodeEntry::new(0xFFFF_FC00, 0x1E27_0000, M::FmovFromGeneral),
    DecodeEntry::new(0xFFFF_FC00, 0x9E66_0000, M::FmovToGeneral),
    DecodeEntry::new(0xFFFF_FC00, 0x9E67_0000, M::FmovFromGeneral),
    DecodeEntry::new(0xFFFF_FC00, 0x1E22_0000, M::Scvtf),
    DecodeEntry::new(0xFFFF_FC00, 0x1E23_0000, M::Ucvtf),
    DecodeEntry::new(0xFFFF_FC00, 0x9E62_0000, M::Scvtf),
    DecodeEntry::new(0xFFFF_FC00, 0x9E63_0000, M::Ucvtf),
    DecodeEntry::new(0xFFFF_FC00, 0x1E38_0000, M::Fcvtzs),
    DecodeEntry::new(0xFFFF_FC00, 0x1E39_0000, M::Fcvtzu),
    DecodeEntry::new(0xFFFF_FC00, 0x9E78_0000, M::Fcvtzs),
    DecodeEntry::new(0xFFFF_FC00, 0x9E79_0000, M::Fcvtzu),
]);

// Rows ignore `type` (23..22) so single, double and half precision share them.
pub(super) const ONE_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF3F_FC00, 0x1E20_4000, M::FmovRegister),
    DecodeEntry::new(0xFF3F_FC00, 0x1E20_C000, M::Fabs),
    DecodeEntry::new(0xFF3F_FC00, 0x1E21_4000, M::Fneg),
    DecodeEntry::new(0xFF3F_FC00, 0x1E21_C000, M::Fsqrt),
]);

pub(super) const COMPARE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_FC17, 0x1E20_2000, M::Fcmp),
    DecodeEntry::new(0xFF20_FC17, 0x1E20_2010, M::Fcmpe),
]);

pub(super) const IMMEDIATE_TABLE: DecodeTable<M> =
    DecodeTable::new(&[DecodeEntry::new(0xFF20_1FE0, 0x1E20_1000, M::FmovImmediate)]);

pub(super) const CONDITIONAL_COMPARE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_0C10, 0x1E20_0400, M::Fccmp),
    DecodeEntry::new(0xFF20_0C10, 0x1E20_0410, M::Fccmpe),
]);

pub(super) const TWO_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_FC00, 0x1E20_0800, M::Fmul),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_1800, M::Fdiv),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_2800, M::Fadd),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_3800, M::Fsub),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_4800, M::Fmax),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_5800, M::Fmin),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_6800, M::Fmaxnm),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_7800, M::Fminnm),
    DecodeEntry::new(0xFF20_FC00, 0x1E20_8800, M::Fnmul),
]);

pub(super) const CONDITIONAL_SELECT_TABLE: DecodeTable<M> =
    DecodeTable::new(&[DecodeEntry::new(0xFF20_0C00, 0x1E20_0C00, M::Fcsel)]);

pub(super) const THREE_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_8000, 0x1F00_0000, M::Fmadd),
    DecodeEntry::new(0xFF20_8000, 0x1F00_8000, M::Fmsub),
    DecodeEntry::new(0xFF20_8000, 0x1F20_0000, M::Fnmadd),
    DecodeEntry::new(0xFF20_8000, 0x1F20_8000, M::Fnmsub),
]);

use super::{DecodeEntry, DecodeTable, InstructionClass as C, Mnemonic as M};

pub(super) const CLASS_TABLE: DecodeTable<C> = DecodeTable::new(&[
    DecodeEntry::new(0x5FE0_0000, 0x1AC0_0000, C::DataProcessingTwoSource),
    DecodeEntry::new(0x5FE0_0000, 0x5AC0_0000, C::DataProcessingOneSource),
    DecodeEntry::new(0x1F00_0000, 0x0A00_0000, C::LogicalShiftedRegister),
    DecodeEntry::new(0x1F20_0000, 0x0B00_0000, C::AddSubtractShiftedRegister),
    DecodeEntry::new(0x1F20_0000, 0x0B20_0000, C::AddSubtractExtendedRegister),
    DecodeEntry::new(0x1FE0_FC00, 0x1A00_0000, C::AddSubtractWithCarry),
    DecodeEntry::new(0x1FE0_7C00, 0x1A00_0400, C::RotateRightIntoFlags),
    DecodeEntry::new(0x1FE0_3C00, 0x1A00_0800, C::EvaluateIntoFlags),
    DecodeEntry::new(0x1FE0_0800, 0x1A40_0000, C::ConditionalCompareRegister),
    DecodeEntry::new(0x1FE0_0800, 0x1A40_0800, C::ConditionalCompareImmediate),
    DecodeEntry::new(0x1FE0_0000, 0x1A80_0000, C::ConditionalSelect),
    DecodeEntry::new(0x1F00_0000, 0x1B00_0000, C::DataProcessingThreeSource),
]);

pub(super) const TWO_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_0800, M::UdivW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_0C00, M::SdivW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_2000, M::LslvW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_2400, M::LsrvW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_2800, M::AsrvW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_2C00, M::RorvW),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_4000, M::Crc32b),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_4400, M::Crc32h),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_4800, M::Crc32w),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_5000, M::Crc32cb),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_5400, M::Crc32ch),
    DecodeEntry::new(0xFFE0_FC00, 0x1AC0_5800, M::Crc32cw),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_0000, M::Subp),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_0800, M::UdivX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_0C00, M::SdivX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_1000, M::Irg),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_1400, M::Gmi),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_2000, M::LslvX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_2400, M::LsrvX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_2800, M::AsrvX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_2C00, M::RorvX),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_3000, M::Pacga),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_4C00, M::Crc32x),
    DecodeEntry::new(0xFFE0_FC00, 0x9AC0_5C00, M::Crc32cx),
    DecodeEntry::new(0xFFE0_FC00, 0xBAC0_0000, M::Subps),
]);

pub(super) const ONE_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_FC00, 0x5AC0_0000, M::RbitW),
    DecodeEntry::new(0xFFFF_FC00, 0x5AC0_0400, M::Rev16W),
    DecodeEntry::new(0xFFFF_FC00, 0x5AC0_0800, M::RevW),
    DecodeEntry::new(0xFFFF_FC00, 0x5AC0_1000, M::ClzW),
    DecodeEntry::new(0xFFFF_FC00, 0x5AC0_1400, M::ClsW),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_0000, M::RbitX),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_0400, M::Rev16X),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_0800, M::Rev32),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_0C00, M::RevX),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_1000, M::ClzX),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC0_1400, M::ClsX),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_0000, M::Pacia),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_0400, M::Pacib),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_0800, M::Pacda),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_0C00, M::Pacdb),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_1000, M::Autia),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_1400, M::Autib),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_1800, M::Autda),
    DecodeEntry::new(0xFFFF_FC00, 0xDAC1_1C00, M::Autdb),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_23E0, M::Paciza),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_27E0, M::Pacizb),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_2BE0, M::Pacdza),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_2FE0, M::Pacdzb),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_33E0, M::Autiza),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_37E0, M::Autizb),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_3BE0, M::Autdza),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_3FE0, M::Autdzb),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_43E0, M::Xpaci),
    DecodeEntry::new(0xFFFF_FFE0, 0xDAC1_47E0, M::Xpacd),
]);

pub(super) const LOGICAL_SHIFTED_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_0000, 0x0A00_0000, M::AndW),
    DecodeEntry::new(0xFF20_0000, 0x0A20_0000, M::BicW),
    DecodeEntry::new(0xFF20_0000, 0x2A00_0000, M::OrrW),
    DecodeEntry::new(0xFF20_0000, 0x2A20_0000, M::OrnW),
    DecodeEntry::new(0xFF20_0000, 0x4A00_0000, M::EorW),
    DecodeEntry::new(0xFF20_0000, 0x4A20_0000, M::EonW),
    DecodeEntry::new(0xFF20_0000, 0x6A00_0000, M::AndsW),
    DecodeEntry::new(0xFF20_0000, 0x6A20_0000, M::BicsW),
    DecodeEntry::new(0xFF20_0000, 0x8A00_0000, M::AndX),
    DecodeEntry::new(0xFF20_0000, 0x8A20_0000, M::BicX),
    DecodeEntry::new(0xFF20_0000, 0xAA00_0000, M::OrrX),
    DecodeEntry::new(0xFF20_0000, 0xAA20_0000, M::OrnX),
    DecodeEntry::new(0xFF20_0000, 0xCA00_0000, M::EorX),
    DecodeEntry::new(0xFF20_0000, 0xCA20_0000, M::EonX),
    DecodeEntry::new(0xFF20_0000, 0xEA00_0000, M::AndsX),
    DecodeEntry::new(0xFF20_0000, 0xEA20_0000, M::BicsX),
]);

pub(super) const ADD_SUB_SHIFTED_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF20_0000, 0x0B00_0000, M::AddW),
    DecodeEntry::new(0xFF20_0000, 0x2B00_0000, M::AddsW),
    DecodeEntry::new(0xFF20_0000, 0x4B00_0000, M::SubW),
    DecodeEntry::new(0xFF20_0000, 0x6B00_0000, M::SubsW),
    DecodeEntry::new(0xFF20_0000, 0x8B00_0000, M::AddX),
    DecodeEntry::new(0xFF20_0000, 0xAB00_0000, M::AddsX),
    DecodeEntry::new(0xFF20_0000, 0xCB00_0000, M::SubX),
    DecodeEntry::new(0xFF20_0000, 0xEB00_0000, M::SubsX),
]);

pub(super) const ADD_SUB_EXTENDED_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_0000, 0x0B20_0000, M::AddExtW),
    DecodeEntry::new(0xFFE0_0000, 0x2B20_0000, M::AddsExtW),
    DecodeEntry::new(0xFFE0_0000, 0x4B20_0000, M::SubExtW),
    DecodeEntry::new(0xFFE0_0000, 0x6B20_0000, M::SubsExtW),
    DecodeEntry::new(0xFFE0_0000, 0x8B20_0000, M::AddExtX),
    DecodeEntry::new(0xFFE0_0000, 0xAB20_0000, M::AddsExtX),
    DecodeEntry::new(0xFFE0_0000, 0xCB20_0000, M::SubExtX),
    DecodeEntry::new(0xFFE0_0000, 0xEB20_0000, M::SubsExtX),
]);

pub(super) const ADD_SUB_CARRY_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_0000, 0x1A00_0000, M::AdcW),
    DecodeEntry::new(0xFFE0_0000, 0x3A00_0000, M::AdcsW),
    DecodeEntry::new(0xFFE0_0000, 0x5A00_0000, M::SbcW),
    DecodeEntry::new(0xFFE0_0000, 0x7A00_0000, M::SbcsW),
    DecodeEntry::new(0xFFE0_0000, 0x9A00_0000, M::AdcX),
    DecodeEntry::new(0xFFE0_0000, 0xBA00_0000, M::AdcsX),
    DecodeEntry::new(0xFFE0_0000, 0xDA00_0000, M::SbcX),
    DecodeEntry::new(0xFFE0_0000, 0xFA00_0000, M::SbcsX),
]);

pub(super) const ROTATE_INTO_FLAGS_TABLE: DecodeTable<M> =
    DecodeTable::new(&[DecodeEntry::new(0xFFE0_7C10, 0xBA00_0400, M::Rmif)]);

pub(super) const EVALUATE_INTO_FLAGS_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_FC1F, 0x3A00_080D, M::Setf8),
    DecodeEntry::new(0xFFFF_FC1F, 0x3A00_480D, M::Setf16),
]);

pub(super) const CONDITIONAL_COMPARE_REGISTER_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_0C10, 0x3A40_0000, M::CcmnRegW),
    DecodeEntry::new(0xFFE0_0C10, 0x7A40_0000, M::CcmpRegW),
    DecodeEntry::new(0xFFE0_0C10, 0xBA40_0000, M::CcmnRegX),
    DecodeEntry::new(0xFFE0_0C10, 0xFA40_0000, M::CcmpRegX),
]);

pub(super) const CONDITIONAL_COMPARE_IMMEDIATE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_0C10, 0x3A40_0800, M::CcmnImmW),
    DecodeEntry::new(0xFFE0_0C10, 0x7A40_0800, M::CcmpImmW),
    DecodeEntry::new(0xFFE0_0C10, 0xBA40_0800, M::CcmnImmX),
    DecodeEntry::new(0xFFE0_0C10, 0xFA40_0800, M::CcmpImmX),
]);

pub(super) const CONDITIONAL_SELECT_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_0C00, 0x1A80_0000, M::CselW),
    DecodeEntry::new(0xFFE0_0C00, 0x1A80_0400, M::CsincW),
    DecodeEntry::new(0xFFE0_0C00, 0x5A80_0000, M::CsinvW),
    DecodeEntry::new(0xFFE0_0C00, 0x5A80_0400, M::CsnegW),
    DecodeEntry::new(0xFFE0_0C00, 0x9A80_0000, M::CselX),
    DecodeEntry::new(0xFFE0_0C00, 0x9A80_0400, M::CsincX),
    DecodeEntry::new(0xFFE0_0C00, 0xDA80_0000, M::CsinvX),
    DecodeEntry::new(0xFFE0_0C00, 0xDA80_0400, M::CsnegX),
]);

pub(super) const THREE_SOURCE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_8000, 0x1B00_0000, M::MaddW),
    DecodeEntry::new(0xFFE0_8000, 0x1B00_8000, M::MsubW),
    DecodeEntry::new(0xFFE0_8000, 0x9B00_0000, M::MaddX),
    DecodeEntry::new(0xFFE0_8000, 0x9B00_8000, M::MsubX),
    DecodeEntry::new(0xFFE0_8000, 0x9B20_0000, M::Smaddl),
    DecodeEntry::new(0xFFE0_8000, 0x9B20_8000, M::Smsubl),
    DecodeEntry::new(0xFFE0_8000, 0x9B40_0000, M::Smulh),
    DecodeEntry::new(0xFFE0_8000, 0x9BA0_0000, M::Umaddl),
    DecodeEntry::new(0xFFE0_8000, 0x9BA0_8000, M::Umsubl),
    DecodeEntry::new(0xFFE0_8000, 0x9BC0_0000, M::Umulh),
]);

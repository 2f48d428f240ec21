use super::{DecodeEntry, DecodeTable, InstructionClass as C, Mnemonic as M};

pub(super) const CLASS_TABLE: DecodeTable<C> = DecodeTable::new(&[
    DecodeEntry::new(0xFE00_0000, 0x5400_0000, C::ConditionalBranch),
    DecodeEntry::new(0xFF00_0000, 0xD400_0000, C::ExceptionGeneration),
    DecodeEntry::new(0xFFFF_F01F, 0xD503_201F, C::Hints),
    DecodeEntry::new(0xFFFF_F000, 0xD503_3000, C::Barriers),
    DecodeEntry::new(0xFFF8_F000, 0xD500_4000, C::PState),
    DecodeEntry::new(0xFFD8_0000, 0xD508_0000, C::SystemInstructions),
    DecodeEntry::new(0xFFD0_0000, 0xD510_0000, C::SystemRegisterMove),
    DecodeEntry::new(0xFE00_0000, 0xD600_0000, C::UnconditionalBranchRegister),
    DecodeEntry::new(0x7C00_0000, 0x1400_0000, C::UnconditionalBranchImmediate),
    DecodeEntry::new(0x7E00_0000, 0x3400_0000, C::CompareAndBranch),
    DecodeEntry::new(0x7E00_0000, 0x3600_0000, C::TestAndBranch),
]);

pub(super) const CONDITIONAL_BRANCH_TABLE: DecodeTable<M> =
    DecodeTable::new(&[DecodeEntry::new(0xFF00_0010, 0x5400_0000, M::BCond)]);

pub(super) const EXCEPTION_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFE0_001F, 0xD400_0001, M::Svc),
    DecodeEntry::new(0xFFE0_001F, 0xD400_0002, M::Hvc),
    DecodeEntry::new(0xFFE0_001F, 0xD400_0003, M::Smc),
    DecodeEntry::new(0xFFE0_001F, 0xD420_0000, M::Brk),
    DecodeEntry::new(0xFFE0_001F, 0xD440_0000, M::Hlt),
    DecodeEntry::new(0xFFE0_001F, 0xD4A0_0001, M::Dcps1),
    DecodeEntry::new(0xFFE0_001F, 0xD4A0_0002, M::Dcps2),
    DecodeEntry::new(0xFFE0_001F, 0xD4A0_0003, M::Dcps3),
]);

// Unallocated hint encodings retire as NOP, so the catch-all row stays last.
pub(super) const HINTS_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_201F, M::Nop),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_203F, M::Yield),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_205F, M::Wfe),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_207F, M::Wfi),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_209F, M::Sev),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_20BF, M::Sevl),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_20DF, M::Dgh),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_20FF, M::Xpaclri),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_211F, M::Pacia1716),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_215F, M::Pacib1716),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_219F, M::Autia1716),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_21DF, M::Autib1716),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_221F, M::Esb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_223F, M::PsbCsync),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_225F, M::TsbCsync),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_229F, M::Csdb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_231F, M::Paciaz),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_233F, M::Paciasp),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_235F, M::Pacibz),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_237F, M::Pacibsp),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_239F, M::Autiaz),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_23BF, M::Autiasp),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_23DF, M::Autibz),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_23FF, M::Autibsp),
    DecodeEntry::new(0xFFFF_FF3F, 0xD503_241F, M::Bti),
    DecodeEntry::new(0xFFFF_F01F, 0xD503_201F, M::Hint),
]);

// PSSBB shares its encoding with DSB #4 and is never reached.
pub(super) const BARRIERS_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_F0FF, 0xD503_305F, M::Clrex),
    DecodeEntry::new(0xFFFF_F0FF, 0xD503_30BF, M::Dmb),
    DecodeEntry::new(0xFFFF_F0FF, 0xD503_30DF, M::Isb),
    DecodeEntry::new(0xFFFF_F0FF, 0xD503_30FF, M::Sb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_319F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_329F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_339F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_349F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_359F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_369F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_379F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_389F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_399F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3A9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3B9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3C9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3D9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3E9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_3F9F, M::Dsb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_309F, M::Ssbb),
    DecodeEntry::new(0xFFFF_FFFF, 0xD503_349F, M::Pssbb),
]);

pub(super) const PSTATE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_F0FF, 0xD500_401F, M::Cfinv),
    DecodeEntry::new(0xFFFF_F0FF, 0xD500_403F, M::Xaflag),
    DecodeEntry::new(0xFFFF_F0FF, 0xD500_405F, M::Axflag),
    DecodeEntry::new(0xFFF8_F01F, 0xD500_401F, M::MsrImmediate),
]);

pub(super) const SYSTEM_INSTRUCTIONS_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFF8_0000, 0xD508_0000, M::Sys),
    DecodeEntry::new(0xFFF8_0000, 0xD528_0000, M::Sysl),
]);

pub(super) const SYSTEM_REGISTER_MOVE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFF0_0000, 0xD510_0000, M::Msr),
    DecodeEntry::new(0xFFF0_0000, 0xD530_0000, M::Mrs),
]);

pub(super) const BRANCH_REGISTER_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFFFF_FC1F, 0xD61F_0000, M::Br),
    DecodeEntry::new(0xFFFF_FC1F, 0xD61F_081F, M::Braaz),
    DecodeEntry::new(0xFFFF_FC1F, 0xD61F_0C1F, M::Brabz),
    DecodeEntry::new(0xFFFF_FC1F, 0xD63F_0000, M::Blr),
    DecodeEntry::new(0xFFFF_FC1F, 0xD63F_081F, M::Blraaz),
    DecodeEntry::new(0xFFFF_FC1F, 0xD63F_0C1F, M::Blrabz),
    DecodeEntry::new(0xFFFF_FC1F, 0xD65F_0000, M::Ret),
    DecodeEntry::new(0xFFFF_FFFF, 0xD65F_0BFF, M::Retaa),
    DecodeEntry::new(0xFFFF_FFFF, 0xD65F_0FFF, M::Retab),
    DecodeEntry::new(0xFFFF_FFFF, 0xD69F_03E0, M::Eret),
    DecodeEntry::new(0xFFFF_FFFF, 0xD69F_0BFF, M::Eretaa),
    DecodeEntry::new(0xFFFF_FFFF, 0xD69F_0FFF, M::Eretab),
    DecodeEntry::new(0xFFFF_FFFF, 0xD6BF_03E0, M::Drps),
    DecodeEntry::new(0xFFFF_FC00, 0xD71F_0800, M::Braa),
    DecodeEntry::new(0xFFFF_FC00, 0xD71F_0C00, M::Brab),
    DecodeEntry::new(0xFFFF_FC00, 0xD73F_0800, M::Blraa),
    DecodeEntry::new(0xFFFF_FC00, 0xD73F_0C00, M::Blrab),
]);

pub(super) const BRANCH_IMMEDIATE_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFC00_0000, 0x1400_0000, M::B),
    DecodeEntry::new(0xFC00_0000, 0x9400_0000, M::Bl),
]);

pub(super) const COMPARE_AND_BRANCH_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0xFF00_0000, 0x3400_0000, M::CbzW),
    DecodeEntry::new(0xFF00_0000, 0x3500_0000, M::CbnzW),
    DecodeEntry::new(0xFF00_0000, 0xB400_0000, M::CbzX),
    DecodeEntry::new(0xFF00_0000, 0xB500_0000, M::CbnzX),
]);

pub(super) const TEST_AND_BRANCH_TABLE: DecodeTable<M> = DecodeTable::new(&[
    DecodeEntry::new(0x7F00_0000, 0x3600_0000, M::Tbz),
    DecodeEntry::new(0x7F00_0000, 0x3700_0000, M::Tbnz),
]);

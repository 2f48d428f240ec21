//! A64 instruction execution.
//!
//! Each instruction runs in two phases:
//! 1. [`execute_instruction`] reads operands and memory and records every
//!    effect in an [`ExecuteState`]
//! 2. [`commit_execution`] applies stores, register writes, flags and PC
//!
//! All operations are precise: a faulting instruction commits nothing.

#![allow(
    clippy::pedantic,
    clippy::nursery,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    unknown_lints
)]

mod flags;
mod helpers;

pub use flags::{Condition, FlagsUpdate};
pub use helpers::{
    add_with_carry, decode_bit_masks, ones, shift_value, sign_extend, OperandWidth, ShiftType,
};

use crate::api::DataBus;
use crate::decoder::{DecodedInstruction, Decoder};
use crate::encoding::{DecodeGroup, InstructionClass, Mnemonic};
use crate::fault::FaultCode;
use crate::instruction::{Field, Instruction};
use crate::state::{RegisterFile, LINK_REGISTER, ZERO_OR_SP};
use helpers::bits;

/// How register number 31 is interpreted by a pending write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterTarget {
    /// 31 is XZR; the write is discarded.
    Data,
    /// 31 is the current stack pointer.
    Address,
}

/// Register write recorded during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Register number.
    pub reg: u8,
    /// Value, already zero-extended for `W` destinations.
    pub value: u64,
    /// Interpretation of register 31.
    pub target: RegisterTarget,
}

/// Memory store recorded during execution; its address is already probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStore {
    /// Byte address.
    pub addr: u64,
    /// Access width in bytes.
    pub bytes: u64,
    /// Data, low `bytes` significant.
    pub value: u64,
}

/// Effects accumulated by one instruction. Nothing is applied until
/// [`commit_execution`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteState {
    /// Register writes in program order.
    pub register_writes: Vec<RegisterWrite>,
    /// Stores in program order.
    pub stores: Vec<PendingStore>,
    /// NZCV update.
    pub flags_update: FlagsUpdate,
    /// PC after the instruction.
    pub next_pc: u64,
}

impl ExecuteState {
    /// Creates an empty state that falls through to `next_pc`.
    #[must_use]
    pub fn new(next_pc: u64) -> Self {
        Self {
            next_pc,
            ..Self::default()
        }
    }

    fn write_data(&mut self, reg: u8, value: u64) {
        self.register_writes.push(RegisterWrite {
            reg,
            value,
            target: RegisterTarget::Data,
        });
    }

    fn write_address(&mut self, reg: u8, value: u64) {
        self.register_writes.push(RegisterWrite {
            reg,
            value,
            target: RegisterTarget::Address,
        });
    }

    fn store(&mut self, bus: &dyn DataBus, addr: u64, bytes: u64, value: u64) -> Result<(), FaultCode> {
        bus.probe_store(addr, bytes)?;
        self.stores.push(PendingStore { addr, bytes, value });
        Ok(())
    }
}

/// Outcome of [`step_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired and its effects were committed.
    Retired {
        /// Byte address of the instruction.
        pc: u64,
        /// Raw opcode word.
        word: u32,
        /// Top-level encoding group.
        group: DecodeGroup,
        /// Decoded mnemonic.
        mnemonic: Mnemonic,
    },
    /// The instruction faulted; nothing was committed.
    Fault {
        /// Byte address of the instruction.
        pc: u64,
        /// Raw opcode word, when the fetch succeeded.
        word: Option<u32>,
        /// Raised fault.
        cause: FaultCode,
    },
}

/// Fetches, decodes, executes and commits one instruction.
pub fn step_one(regs: &mut RegisterFile, bus: &mut dyn DataBus) -> StepOutcome {
    let pc = regs.pc();
    let word = match bus.fetch(pc) {
        Ok(word) => word,
        Err(cause) => {
            return StepOutcome::Fault {
                pc,
                word: None,
                cause,
            }
        }
    };
    let decoded: Result<DecodedInstruction, FaultCode> = Decoder::decode(word).into();
    let fault = |cause| StepOutcome::Fault {
        pc,
        word: Some(word),
        cause,
    };
    let instruction = match decoded {
        Ok(instruction) => instruction,
        Err(cause) => return fault(cause),
    };
    match execute_instruction(&instruction, regs, bus) {
        Ok(exec) => {
            commit_execution(regs, bus, &exec);
            StepOutcome::Retired {
                pc,
                word,
                group: instruction.group,
                mnemonic: instruction.mnemonic,
            }
        }
        Err(cause) => fault(cause),
    }
}

/// Executes `instr` against `regs`, reading memory through `bus`, and
/// returns the effects to commit.
///
/// # Errors
///
/// Returns the [`FaultCode`] raised by the instruction. Register state and
/// memory contents are unchanged in that case.
pub fn execute_instruction(
    instr: &DecodedInstruction,
    regs: &RegisterFile,
    bus: &mut dyn DataBus,
) -> Result<ExecuteState, FaultCode> {
    let op = instr.instruction();
    let mnemonic = instr.mnemonic;
    let mut exec = ExecuteState::new(regs.pc().wrapping_add(4));

    match instr.class {
        InstructionClass::Udf => return Err(FaultCode::UndefinedInstruction),
        InstructionClass::PcRelativeAddressing => execute_pc_relative(op, mnemonic, regs, &mut exec)?,
        InstructionClass::AddSubtractImmediate => {
            execute_add_sub_immediate(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::LogicalImmediate => {
            execute_logical_immediate(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::MoveWideImmediate => execute_move_wide(op, mnemonic, regs, &mut exec)?,
        InstructionClass::Bitfield => execute_bitfield(op, mnemonic, regs, &mut exec)?,
        InstructionClass::ConditionalBranch => {
            execute_conditional_branch(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::Hints | InstructionClass::Barriers => {}
        InstructionClass::UnconditionalBranchRegister => {
            execute_branch_register(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::UnconditionalBranchImmediate => {
            execute_branch_immediate(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::CompareAndBranch => {
            execute_compare_branch(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::TestAndBranch => execute_test_branch(op, mnemonic, regs, &mut exec)?,
        InstructionClass::AddSubtractShiftedRegister => {
            execute_add_sub_shifted(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::LogicalShiftedRegister => {
            execute_logical_shifted(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::DataProcessingThreeSource => {
            execute_multiply_add(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::DataProcessingTwoSource => {
            execute_two_source(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::ConditionalSelect => {
            execute_conditional_select(op, mnemonic, regs, &mut exec)?;
        }
        InstructionClass::LoadRegisterLiteral => {
            execute_load_literal(op, mnemonic, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStoreUnsignedImmediate => {
            execute_load_store(op, mnemonic, Indexing::Offset, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStoreImmediatePreIndexed => {
            execute_load_store(op, mnemonic, Indexing::PreIndex, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStoreImmediatePostIndexed => {
            execute_load_store(op, mnemonic, Indexing::PostIndex, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStorePairOffset => {
            execute_load_store_pair(op, mnemonic, Indexing::Offset, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStorePairPreIndexed => {
            execute_load_store_pair(op, mnemonic, Indexing::PreIndex, regs, bus, &mut exec)?;
        }
        InstructionClass::LoadStorePairPostIndexed => {
            execute_load_store_pair(op, mnemonic, Indexing::PostIndex, regs, bus, &mut exec)?;
        }
        _ => return Err(FaultCode::UnsupportedInstruction),
    }

    Ok(exec)
}

/// Applies the effects recorded in `exec`. Call only with a state returned by
/// a successful [`execute_instruction`].
pub fn commit_execution(regs: &mut RegisterFile, bus: &mut dyn DataBus, exec: &ExecuteState) {
    for store in &exec.stores {
        bus.store(store.addr, store.bytes, store.value);
    }

    for write in &exec.register_writes {
        match write.target {
            RegisterTarget::Data => regs.set_gpr(write.reg, write.value),
            RegisterTarget::Address => regs.set_gpr_or_sp(write.reg, write.value),
        }
    }

    if let FlagsUpdate::Set(nzcv) = exec.flags_update {
        regs.set_nzcv(nzcv);
    }

    regs.set_pc(exec.next_pc);
}

fn reg(op: Instruction, field: Field) -> u8 {
    op.field_u32(field) as u8
}

fn sf_width(op: Instruction) -> OperandWidth {
    OperandWidth::from_sf(op.bit(31))
}

/// Byte offset of a word-scaled PC-relative immediate of `bits` bits.
fn branch_offset(op: Instruction, field: Field, bits: u32) -> u64 {
    sign_extend(u64::from(op.field_u32(field)) << 2, bits + 2)
}

fn execute_pc_relative(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let imm = u64::from(op.field_u32(Field::ImmHi) << 2 | op.field_u32(Field::ImmLo));
    let pc = regs.pc();
    let value = match mnemonic {
        Mnemonic::Adr => pc.wrapping_add(sign_extend(imm, 21)),
        Mnemonic::Adrp => (pc & !0xFFF).wrapping_add(sign_extend(imm << 12, 33)),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(reg(op, Field::Rd), value);
    Ok(())
}

fn execute_add_sub_immediate(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let mut imm = u64::from(op.field_u32(Field::Imm12));
    if op.field_u32(Field::Sh) == 1 {
        imm <<= 12;
    }
    let operand = regs.gpr_or_sp(reg(op, Field::Rn));
    let (subtract, set_flags) = match mnemonic {
        Mnemonic::AddImmW | Mnemonic::AddImmX => (false, false),
        Mnemonic::AddsImmW | Mnemonic::AddsImmX => (false, true),
        Mnemonic::SubImmW | Mnemonic::SubImmX => (true, false),
        Mnemonic::SubsImmW | Mnemonic::SubsImmX => (true, true),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    let (result, nzcv) = if subtract {
        add_with_carry(operand, !imm, true, width)
    } else {
        add_with_carry(operand, imm, false, width)
    };
    let rd = reg(op, Field::Rd);
    if set_flags {
        exec.write_data(rd, result);
        exec.flags_update = FlagsUpdate::Set(nzcv);
    } else {
        exec.write_address(rd, result);
    }
    Ok(())
}

fn execute_logical_immediate(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let (imm, _) = decode_bit_masks(
        op.field_u32(Field::N) == 1,
        op.field_u32(Field::Imms),
        op.field_u32(Field::Immr),
        true,
        width,
    )?;
    let operand = width.truncate(regs.gpr(reg(op, Field::Rn)));
    let rd = reg(op, Field::Rd);
    match mnemonic {
        Mnemonic::AndImmW | Mnemonic::AndImmX => exec.write_address(rd, operand & imm),
        Mnemonic::OrrImmW | Mnemonic::OrrImmX => exec.write_address(rd, operand | imm),
        Mnemonic::EorImmW | Mnemonic::EorImmX => exec.write_address(rd, operand ^ imm),
        Mnemonic::AndsImmW | Mnemonic::AndsImmX => {
            let result = operand & imm;
            exec.write_data(rd, result);
            exec.flags_update = FlagsUpdate::logical(result, width.bits());
        }
        _ => return Err(FaultCode::UnsupportedInstruction),
    }
    Ok(())
}

fn execute_move_wide(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let hw = op.field_u32(Field::Hw);
    if width == OperandWidth::W32 && hw >= 2 {
        return Err(FaultCode::UndefinedInstruction);
    }
    let pos = hw * 16;
    let imm = u64::from(op.field_u32(Field::Imm16)) << pos;
    let rd = reg(op, Field::Rd);
    let result = match mnemonic {
        Mnemonic::MovnW | Mnemonic::MovnX => !imm,
        Mnemonic::MovzW | Mnemonic::MovzX => imm,
        Mnemonic::MovkW | Mnemonic::MovkX => (regs.gpr(rd) & !(0xFFFF << pos)) | imm,
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(rd, width.truncate(result));
    Ok(())
}

fn execute_bitfield(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let immr = op.field_u32(Field::Immr);
    let imms = op.field_u32(Field::Imms);
    if width == OperandWidth::W32 && (immr >= 32 || imms >= 32) {
        return Err(FaultCode::UndefinedBehaviour);
    }
    let (wmask, tmask) = decode_bit_masks(op.field_u32(Field::N) == 1, imms, immr, false, width)?;
    let rd = reg(op, Field::Rd);
    let src = width.truncate(regs.gpr(reg(op, Field::Rn)));
    let rotated = shift_value(src, ShiftType::Ror, immr, width);

    let result = match mnemonic {
        Mnemonic::SbfmW | Mnemonic::SbfmX => {
            let top = if (src >> imms) & 1 == 1 { width.mask() } else { 0 };
            (top & !tmask) | (rotated & wmask & tmask)
        }
        Mnemonic::UbfmW | Mnemonic::UbfmX => rotated & wmask & tmask,
        Mnemonic::BfmW | Mnemonic::BfmX => {
            let dst = width.truncate(regs.gpr(rd));
            let bottom = (dst & !wmask) | (rotated & wmask);
            (dst & !tmask) | (bottom & tmask)
        }
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(rd, width.truncate(result));
    Ok(())
}

fn execute_conditional_branch(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    if mnemonic != Mnemonic::BCond {
        return Err(FaultCode::UnsupportedInstruction);
    }
    if Condition::from_bits(op.field_u32(Field::Cond)).holds(regs.nzcv()) {
        exec.next_pc = regs.pc().wrapping_add(branch_offset(op, Field::Imm19, 19));
    }
    Ok(())
}

fn execute_branch_register(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let target = regs.gpr(reg(op, Field::Rn));
    match mnemonic {
        Mnemonic::Br | Mnemonic::Ret => {}
        Mnemonic::Blr => exec.write_data(LINK_REGISTER, regs.pc().wrapping_add(4)),
        _ => return Err(FaultCode::UnsupportedInstruction),
    }
    exec.next_pc = target;
    Ok(())
}

fn execute_branch_immediate(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    match mnemonic {
        Mnemonic::B => {}
        Mnemonic::Bl => exec.write_data(LINK_REGISTER, regs.pc().wrapping_add(4)),
        _ => return Err(FaultCode::UnsupportedInstruction),
    }
    exec.next_pc = regs.pc().wrapping_add(branch_offset(op, Field::Imm26, 26));
    Ok(())
}

fn execute_compare_branch(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let value = sf_width(op).truncate(regs.gpr(reg(op, Field::Rt)));
    let taken = match mnemonic {
        Mnemonic::CbzW | Mnemonic::CbzX => value == 0,
        Mnemonic::CbnzW | Mnemonic::CbnzX => value != 0,
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    if taken {
        exec.next_pc = regs.pc().wrapping_add(branch_offset(op, Field::Imm19, 19));
    }
    Ok(())
}

fn execute_test_branch(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let bit = op.field_u32(Field::B5) << 5 | op.field_u32(Field::B40);
    let set = (regs.gpr(reg(op, Field::Rt)) >> bit) & 1 == 1;
    let taken = match mnemonic {
        Mnemonic::Tbz => !set,
        Mnemonic::Tbnz => set,
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    if taken {
        exec.next_pc = regs.pc().wrapping_add(branch_offset(op, Field::Imm14, 14));
    }
    Ok(())
}

/// Second operand of the shifted-register forms.
fn shifted_operand(
    op: Instruction,
    regs: &RegisterFile,
    width: OperandWidth,
    allow_ror: bool,
) -> Result<u64, FaultCode> {
    let shift = ShiftType::from_bits(op.field_u32(Field::Shift));
    let amount = op.field_u32(Field::Imm6);
    if (shift == ShiftType::Ror && !allow_ror) || amount >= width.bits() {
        return Err(FaultCode::UndefinedInstruction);
    }
    Ok(shift_value(regs.gpr(reg(op, Field::Rm)), shift, amount, width))
}

fn execute_add_sub_shifted(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let (subtract, set_flags) = match mnemonic {
        Mnemonic::AddW | Mnemonic::AddX => (false, false),
        Mnemonic::AddsW | Mnemonic::AddsX => (false, true),
        Mnemonic::SubW | Mnemonic::SubX => (true, false),
        Mnemonic::SubsW | Mnemonic::SubsX => (true, true),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    let operand2 = shifted_operand(op, regs, width, false)?;
    let operand1 = regs.gpr(reg(op, Field::Rn));
    let (result, nzcv) = if subtract {
        add_with_carry(operand1, !operand2, true, width)
    } else {
        add_with_carry(operand1, operand2, false, width)
    };
    exec.write_data(reg(op, Field::Rd), result);
    if set_flags {
        exec.flags_update = FlagsUpdate::Set(nzcv);
    }
    Ok(())
}

fn execute_logical_shifted(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let operand2 = shifted_operand(op, regs, width, true)?;
    let operand1 = width.truncate(regs.gpr(reg(op, Field::Rn)));
    let inverted = width.truncate(!operand2);

    let (result, set_flags) = match mnemonic {
        Mnemonic::AndW | Mnemonic::AndX => (operand1 & operand2, false),
        Mnemonic::BicW | Mnemonic::BicX => (operand1 & inverted, false),
        Mnemonic::OrrW | Mnemonic::OrrX => (operand1 | operand2, false),
        Mnemonic::OrnW | Mnemonic::OrnX => (operand1 | inverted, false),
        Mnemonic::EorW | Mnemonic::EorX => (operand1 ^ operand2, false),
        Mnemonic::EonW | Mnemonic::EonX => (operand1 ^ inverted, false),
        Mnemonic::AndsW | Mnemonic::AndsX => (operand1 & operand2, true),
        Mnemonic::BicsW | Mnemonic::BicsX => (operand1 & inverted, true),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(reg(op, Field::Rd), result);
    if set_flags {
        exec.flags_update = FlagsUpdate::logical(result, width.bits());
    }
    Ok(())
}

fn execute_multiply_add(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let product = regs
        .gpr(reg(op, Field::Rn))
        .wrapping_mul(regs.gpr(reg(op, Field::Rm)));
    let addend = regs.gpr(reg(op, Field::Ra));
    let result = match mnemonic {
        Mnemonic::MaddW | Mnemonic::MaddX => addend.wrapping_add(product),
        Mnemonic::MsubW | Mnemonic::MsubX => addend.wrapping_sub(product),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(reg(op, Field::Rd), width.truncate(result));
    Ok(())
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn execute_two_source(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let operand1 = width.truncate(regs.gpr(reg(op, Field::Rn)));
    let operand2 = width.truncate(regs.gpr(reg(op, Field::Rm)));
    let signed1 = sign_extend(operand1, width.bits()) as i64;
    let signed2 = sign_extend(operand2, width.bits()) as i64;
    let amount = (operand2 % u64::from(width.bits())) as u32;

    let result = match mnemonic {
        Mnemonic::UdivW | Mnemonic::UdivX => operand1.checked_div(operand2).unwrap_or(0),
        Mnemonic::SdivW | Mnemonic::SdivX => {
            if signed2 == 0 {
                0
            } else {
                signed1.wrapping_div(signed2) as u64
            }
        }
        Mnemonic::LslvW | Mnemonic::LslvX => shift_value(operand1, ShiftType::Lsl, amount, width),
        Mnemonic::LsrvW | Mnemonic::LsrvX => shift_value(operand1, ShiftType::Lsr, amount, width),
        Mnemonic::AsrvW | Mnemonic::AsrvX => shift_value(operand1, ShiftType::Asr, amount, width),
        Mnemonic::RorvW | Mnemonic::RorvX => shift_value(operand1, ShiftType::Ror, amount, width),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    exec.write_data(reg(op, Field::Rd), width.truncate(result));
    Ok(())
}

fn execute_conditional_select(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let width = sf_width(op);
    let condition = Condition::from_bits(bits(op.word(), 12, 4));
    let operand1 = regs.gpr(reg(op, Field::Rn));
    let operand2 = regs.gpr(reg(op, Field::Rm));
    let alternative = match mnemonic {
        Mnemonic::CselW | Mnemonic::CselX => operand2,
        Mnemonic::CsincW | Mnemonic::CsincX => operand2.wrapping_add(1),
        Mnemonic::CsinvW | Mnemonic::CsinvX => !operand2,
        Mnemonic::CsnegW | Mnemonic::CsnegX => operand2.wrapping_neg(),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    let result = if condition.holds(regs.nzcv()) {
        operand1
    } else {
        alternative
    };
    exec.write_data(reg(op, Field::Rd), width.truncate(result));
    Ok(())
}

fn execute_load_literal(
    op: Instruction,
    mnemonic: Mnemonic,
    regs: &RegisterFile,
    bus: &mut dyn DataBus,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let address = regs.pc().wrapping_add(branch_offset(op, Field::Imm19, 19));
    let rt = reg(op, Field::Rt);
    match mnemonic {
        Mnemonic::LdrW => exec.write_data(rt, bus.load(address, 4)?),
        Mnemonic::LdrX => exec.write_data(rt, bus.load(address, 8)?),
        Mnemonic::Ldrsw => exec.write_data(rt, sign_extend(bus.load(address, 4)?, 32)),
        Mnemonic::Prfm => {}
        _ => return Err(FaultCode::UnsupportedInstruction),
    }
    Ok(())
}

/// Addressing form of an immediate load or store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indexing {
    /// `[base, #imm]`, no writeback.
    Offset,
    /// `[base, #imm]!`
    PreIndex,
    /// `[base], #imm`
    PostIndex,
}

impl Indexing {
    const fn writes_back(self) -> bool {
        !matches!(self, Self::Offset)
    }

    fn address(self, base: u64, offset: u64) -> u64 {
        match self {
            Self::PostIndex => base,
            Self::Offset | Self::PreIndex => base.wrapping_add(offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    Load,
    LoadSigned,
    Store,
}

fn execute_load_store(
    op: Instruction,
    mnemonic: Mnemonic,
    indexing: Indexing,
    regs: &RegisterFile,
    bus: &mut dyn DataBus,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let (transfer, bytes) = match mnemonic {
        Mnemonic::StrW => (Transfer::Store, 4),
        Mnemonic::LdrW => (Transfer::Load, 4),
        Mnemonic::Ldrsw => (Transfer::LoadSigned, 4),
        Mnemonic::StrX => (Transfer::Store, 8),
        Mnemonic::LdrX => (Transfer::Load, 8),
        Mnemonic::Prfm if indexing == Indexing::Offset => return Ok(()),
        Mnemonic::Prfm => return Err(FaultCode::UndefinedInstruction),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    let rt = reg(op, Field::Rt);
    let rn = reg(op, Field::Rn);
    if indexing.writes_back() && rn == rt && rn != ZERO_OR_SP {
        return Err(FaultCode::UndefinedBehaviour);
    }

    let offset = match indexing {
        Indexing::Offset => u64::from(op.field_u32(Field::Imm12)) << op.field_u32(Field::Size),
        Indexing::PreIndex | Indexing::PostIndex => {
            sign_extend(u64::from(op.field_u32(Field::Imm9)), 9)
        }
    };
    let base = regs.gpr_or_sp(rn);
    let address = indexing.address(base, offset);

    match transfer {
        Transfer::Load => exec.write_data(rt, bus.load(address, bytes)?),
        Transfer::LoadSigned => exec.write_data(rt, sign_extend(bus.load(address, bytes)?, 32)),
        Transfer::Store => {
            let data = regs.gpr(rt) & ones(bytes as u32 * 8);
            exec.store(bus, address, bytes, data)?;
        }
    }
    if indexing.writes_back() {
        exec.write_address(rn, base.wrapping_add(offset));
    }
    Ok(())
}

fn execute_load_store_pair(
    op: Instruction,
    mnemonic: Mnemonic,
    indexing: Indexing,
    regs: &RegisterFile,
    bus: &mut dyn DataBus,
    exec: &mut ExecuteState,
) -> Result<(), FaultCode> {
    let (load, bytes) = match mnemonic {
        Mnemonic::StpW => (false, 4u64),
        Mnemonic::LdpW => (true, 4),
        Mnemonic::StpX => (false, 8),
        Mnemonic::LdpX => (true, 8),
        _ => return Err(FaultCode::UnsupportedInstruction),
    };
    let rt = reg(op, Field::Rt);
    let rt2 = reg(op, Field::Rt2);
    let rn = reg(op, Field::Rn);
    if load && rt == rt2 {
        return Err(FaultCode::UndefinedBehaviour);
    }
    if indexing.writes_back() && (rn == rt || rn == rt2) && rn != ZERO_OR_SP {
        return Err(FaultCode::UndefinedBehaviour);
    }

    let offset = sign_extend(u64::from(op.field_u32(Field::Imm7)), 7) << bytes.trailing_zeros();
    let base = regs.gpr_or_sp(rn);
    let address = indexing.address(base, offset);
    let second = address.wrapping_add(bytes);

    if load {
        let first_value = bus.load(address, bytes)?;
        let second_value = bus.load(second, bytes)?;
        exec.write_data(rt, first_value);
        exec.write_data(rt2, second_value);
    } else {
        let mask = ones(bytes as u32 * 8);
        exec.store(bus, address, bytes, regs.gpr(rt) & mask)?;
        exec.store(bus, second, bytes, regs.gpr(rt2) & mask)?;
    }
    if indexing.writes_back() {
        exec.write_address(rn, base.wrapping_add(offset));
    }
    Ok(())
}

//! AArch64 decode/dispatch engine with a simulated cache hierarchy and a
//! steppable multi-core CPU.

/// Fixed-width and heap-backed bit containers.
pub mod bitvec;
pub use bitvec::{BitVector, BitVectorError, INLINE_WIDTH};

/// Raw instruction words and named field extraction.
pub mod instruction;
pub use instruction::{Field, Instruction, FIELD_TABLE};

/// Priority-ordered decode tables for groups, classes and mnemonics.
pub mod encoding;
pub use encoding::{
    classify_class, classify_group, classify_mnemonic, DecodeEntry, DecodeGroup, DecodeTable,
    InstructionClass, Mnemonic, DECODE_GROUP_TABLE,
};

/// Three-level instruction decoder.
pub mod decoder;
pub use decoder::{
    DecodeFault, DecodeFaultCause, DecodeLevel, DecodedInstruction, DecodedOrFault, Decoder,
};

/// Execution fault taxonomy.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// Word memories, direct-mapped caches and access statistics.
pub mod memory;
pub use memory::{
    AccessKind, AccessResult, AccessStats, Address, CacheConfig, CacheConfigError, CacheMemory,
    DataMap, DataUnit, Mapping, Memory, Ram, SharedMemory, UnitMemory, WriteStrategy,
    CACHE_LINE_SIZE, DATA_UNIT_BYTES, MAX_CACHE_SIZE, PROGRAM_EXIT_ADDRESS, STACK_BASE,
};

/// Architectural register state and unit status.
pub mod state;
pub use state::{
    ExceptionLevel, Nzcv, RegisterFile, UnitStatus, GENERAL_REGISTER_COUNT, LINK_REGISTER,
    ZERO_OR_SP,
};

/// Two-phase instruction execution.
pub mod execute;
pub use execute::{
    commit_execution, execute_instruction, step_one, Condition, ExecuteState, FlagsUpdate,
    StepOutcome,
};

/// Trace events, injected log sinks and the unit data bus.
pub mod api;
pub use api::{
    null_sink, tracing_sink, DataBus, LogSink, NullSink, SharedSink, TraceEvent, TracingSink,
};

/// Per-unit execution counters.
pub mod diag;
pub use diag::UnitDiagnostics;

/// CPU construction parameters.
pub mod config;
pub use config::{CpuConfig, CpuConfigError, Dimension};

/// Program images and bundled samples.
pub mod program;
pub use program::{sample_program, LoadError, Program, SAMPLE_PROGRAM_COUNT};

/// Run and step handles with their frames.
pub mod result;
pub use result::{ControlledResult, Frame, ProcessMemoryView, ResultState, RunResult, StepError};

/// Processing units and their worker threads.
pub mod processing_unit;
pub use processing_unit::ProcessingUnit;

/// Modules and cores.
pub mod module;
pub use module::{Core, Module};

/// The CPU root.
pub mod cpu;
pub use cpu::Cpu;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tracing_subscriber as _;

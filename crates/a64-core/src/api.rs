//! Host-facing trace seam.
//!
//! Components never log through a global; each one receives a [`SharedSink`]
//! at construction and tags its events with its own name.

use std::sync::Arc;

use crate::encoding::Mnemonic;
use crate::fault::FaultCode;
use crate::memory::{AccessKind, AccessResult, Address};

/// Events emitted by the CPU hierarchy in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<'a> {
    /// A component finished construction.
    Construction {
        /// Component name, for example `"L2[0]"`.
        component: &'a str,
        /// Free-form sizing detail.
        detail: &'a str,
    },
    /// A processing unit fetched an instruction word.
    Fetch {
        /// Global unit index.
        unit: usize,
        /// Byte address of the fetched word.
        pc: u64,
        /// Raw opcode word.
        word: u32,
    },
    /// An instruction retired and its effects were committed.
    Retire {
        /// Global unit index.
        unit: usize,
        /// Byte address of the retired instruction.
        pc: u64,
        /// Decoded mnemonic.
        mnemonic: Mnemonic,
    },
    /// An instruction faulted; nothing was committed.
    Fault {
        /// Global unit index.
        unit: usize,
        /// Byte address of the faulting instruction.
        pc: u64,
        /// Raised fault.
        cause: FaultCode,
    },
    /// A unit accepted a program.
    ProgramStarted {
        /// Global unit index.
        unit: usize,
        /// Entry word index.
        entry: u64,
    },
    /// A unit finished or abandoned a program.
    ProgramFinished {
        /// Global unit index.
        unit: usize,
        /// `true` when stopped or faulted.
        interrupted: bool,
    },
    /// A unit's worker thread panicked and could not be joined cleanly.
    WorkerPanicked {
        /// Global unit index.
        unit: usize,
    },
    /// A memory or cache served an access.
    MemoryAccess {
        /// Component name.
        component: &'a str,
        /// Access category.
        kind: AccessKind,
        /// Hit or miss at this level.
        result: AccessResult,
        /// Word address of the access.
        address: Address,
    },
}

/// Receiver for [`TraceEvent`]s. Shared across worker threads.
pub trait LogSink: Send + Sync {
    /// Records one event.
    fn on_event(&self, event: TraceEvent<'_>);
}

/// Reference-counted sink handle passed into constructors.
pub type SharedSink = Arc<dyn LogSink>;

/// Instruction and data port of one processing unit, addressed in bytes.
pub trait DataBus {
    /// Fetches the instruction word at `pc`.
    ///
    /// # Errors
    ///
    /// Returns the memory fault raised by the fetch address.
    fn fetch(&mut self, pc: u64) -> Result<u32, FaultCode>;

    /// Loads `bytes` (4 or 8) from `addr`, low word first.
    ///
    /// # Errors
    ///
    /// Returns the memory fault raised by the address.
    fn load(&mut self, addr: u64, bytes: u64) -> Result<u64, FaultCode>;

    /// Checks that a `bytes`-wide store to `addr` would succeed, without
    /// touching memory.
    ///
    /// # Errors
    ///
    /// Returns the memory fault the store would raise.
    fn probe_store(&self, addr: u64, bytes: u64) -> Result<(), FaultCode>;

    /// Stores the low `bytes` of `value` at an address accepted by
    /// [`DataBus::probe_store`].
    ///
    /// # Panics
    ///
    /// Implementations panic when the address would fail the probe.
    fn store(&mut self, addr: u64, bytes: u64, value: u64);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn on_event(&self, _event: TraceEvent<'_>) {}
}

/// Sink that forwards events to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn on_event(&self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Construction { component, detail } => {
                tracing::info!(component, detail, "constructed");
            }
            TraceEvent::Fetch { unit, pc, word } => {
                tracing::trace!(unit, pc, word = format_args!("{word:#010x}"), "fetch");
            }
            TraceEvent::Retire { unit, pc, mnemonic } => {
                tracing::debug!(unit, pc, mnemonic = mnemonic.as_str(), "retire");
            }
            TraceEvent::Fault { unit, pc, cause } => {
                tracing::warn!(unit, pc, code = cause.as_u8(), %cause, "fault");
            }
            TraceEvent::ProgramStarted { unit, entry } => {
                tracing::info!(unit, entry, "program started");
            }
            TraceEvent::ProgramFinished { unit, interrupted } => {
                tracing::info!(unit, interrupted, "program finished");
            }
            TraceEvent::WorkerPanicked { unit } => {
                tracing::error!(unit, "worker thread panicked");
            }
            TraceEvent::MemoryAccess {
                component,
                kind,
                result,
                address,
            } => {
                tracing::trace!(
                    component,
                    kind = kind.as_str(),
                    result = result.as_str(),
                    address,
                    "memory access"
                );
            }
        }
    }
}

/// Returns a sink that drops everything.
#[must_use]
pub fn null_sink() -> SharedSink {
    Arc::new(NullSink)
}

/// Returns a sink that forwards to `tracing`.
#[must_use]
pub fn tracing_sink() -> SharedSink {
    Arc::new(TracingSink)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{LogSink, NullSink, TraceEvent, TracingSink};
    use crate::encoding::Mnemonic;
    use crate::fault::FaultCode;

    #[derive(Default)]
    struct Counting {
        retired: Mutex<Vec<Mnemonic>>,
    }

    impl LogSink for Counting {
        fn on_event(&self, event: TraceEvent<'_>) {
            if let TraceEvent::Retire { mnemonic, .. } = event {
                self.retired.lock().expect("lock").push(mnemonic);
            }
        }
    }

    #[test]
    fn custom_sinks_observe_events_in_order() {
        let sink = Counting::default();
        for mnemonic in [Mnemonic::Nop, Mnemonic::Ret] {
            sink.on_event(TraceEvent::Retire {
                unit: 0,
                pc: 0,
                mnemonic,
            });
        }
        sink.on_event(TraceEvent::ProgramFinished {
            unit: 0,
            interrupted: false,
        });
        assert_eq!(
            *sink.retired.lock().expect("lock"),
            vec![Mnemonic::Nop, Mnemonic::Ret]
        );
    }

    #[test]
    fn builtin_sinks_accept_every_variant() {
        let events = [
            TraceEvent::Construction {
                component: "L1[0]",
                detail: "256 units",
            },
            TraceEvent::Fetch {
                unit: 0,
                pc: 4,
                word: 0xD503_201F,
            },
            TraceEvent::Fault {
                unit: 0,
                pc: 8,
                cause: FaultCode::DataAbort,
            },
            TraceEvent::WorkerPanicked { unit: 1 },
        ];
        for event in events {
            NullSink.on_event(event);
            TracingSink.on_event(event);
        }
    }
}

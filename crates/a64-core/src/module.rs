//! Modules and the cores they group.
//!
//! A module owns the cores that share one L2; a core owns one processing unit.

use crate::diag::UnitDiagnostics;
use crate::memory::{AccessStats, Memory, SharedMemory};
use crate::processing_unit::ProcessingUnit;
use crate::program::Program;
use crate::result::{ControlledResult, RunResult};
use crate::state::UnitStatus;

/// Owns exactly one [`ProcessingUnit`].
pub struct Core {
    unit: ProcessingUnit,
}

impl Core {
    /// Wraps `unit`.
    #[must_use]
    pub const fn new(unit: ProcessingUnit) -> Self {
        Self { unit }
    }

    /// The wrapped unit.
    #[must_use]
    pub const fn unit(&self) -> &ProcessingUnit {
        &self.unit
    }

    /// Queues `program` to run to completion.
    #[must_use]
    pub fn run(&self, program: Program) -> RunResult {
        self.unit.run(program)
    }

    /// Queues `program` for stepping.
    #[must_use]
    pub fn step_in(&self, program: Program) -> ControlledResult {
        self.unit.step_in(program)
    }

    /// Stops the unit at the next instruction boundary.
    pub fn stop(&self) {
        self.unit.stop();
    }

    /// Unit status.
    #[must_use]
    pub fn status(&self) -> UnitStatus {
        self.unit.status()
    }

    /// Unit counters.
    #[must_use]
    pub fn diagnostics(&self) -> UnitDiagnostics {
        self.unit.diagnostics()
    }

    /// L1 statistics.
    #[must_use]
    pub fn l1_stats(&self) -> AccessStats {
        self.unit.l1_stats()
    }
}

/// Owns its cores and the L2 they share.
pub struct Module {
    index: usize,
    l2: SharedMemory,
    cores: Vec<Core>,
}

impl Module {
    /// Groups `cores` behind `l2`.
    ///
    /// # Panics
    ///
    /// Panics when `cores` is empty.
    #[must_use]
    pub fn new(index: usize, l2: SharedMemory, cores: Vec<Core>) -> Self {
        assert!(!cores.is_empty(), "module {index} needs at least one core");
        Self { index, l2, cores }
    }

    /// Module index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Cores in thread order.
    #[must_use]
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Number of cores.
    #[must_use]
    pub fn core_count(&self) -> usize {
        self.cores.len()
    }

    /// Routes `program` to the first core.
    #[must_use]
    pub fn run(&self, program: Program) -> RunResult {
        self.cores[0].run(program)
    }

    /// Routes `program` to the first core for stepping.
    #[must_use]
    pub fn step_in(&self, program: Program) -> ControlledResult {
        self.cores[0].step_in(program)
    }

    /// Stops every core.
    pub fn stop(&self) {
        for core in &self.cores {
            core.stop();
        }
    }

    /// L2 statistics.
    #[must_use]
    pub fn l2_stats(&self) -> AccessStats {
        self.l2.stats()
    }
}

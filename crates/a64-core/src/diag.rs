//! Per-unit execution counters.

use crate::{DecodeGroup, FaultClass, FaultCode};

const GROUP_COUNT: usize = DecodeGroup::ALL.len();

/// Counters a processing unit keeps across every program it handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UnitDiagnostics {
    /// Programs that left the unit, finished or interrupted.
    pub programs_handled: u64,
    /// Programs that ended through a stop request or a fault.
    pub programs_interrupted: u64,
    /// Instructions retired over the unit's lifetime.
    pub instructions_retired: u64,
    /// Retired instructions per [`DecodeGroup`], in [`DecodeGroup::ALL`] order.
    pub retired_by_group: [u64; GROUP_COUNT],
    /// Faults raised over the unit's lifetime.
    pub faults: u64,
    /// Faults of the decode class.
    pub decode_faults: u64,
    /// Faults of the execute class.
    pub execute_faults: u64,
    /// Faults of the memory class.
    pub memory_faults: u64,
    /// The most recent fault and the byte PC that raised it.
    pub last_fault: Option<(FaultCode, u64)>,
}

impl UnitDiagnostics {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fault raised at `pc`.
    #[allow(clippy::missing_const_for_fn)]
    pub fn record_fault(&mut self, code: FaultCode, pc: u64) {
        self.last_fault = Some((code, pc));
        self.faults = self.faults.saturating_add(1);
        let counter = match code.class() {
            FaultClass::Decode => &mut self.decode_faults,
            FaultClass::Execute => &mut self.execute_faults,
            FaultClass::Memory => &mut self.memory_faults,
        };
        *counter = counter.saturating_add(1);
    }

    /// Records one retired instruction of `group`.
    pub fn record_retired(&mut self, group: DecodeGroup) {
        self.instructions_retired = self.instructions_retired.saturating_add(1);
        if let Some(counter) = group_index(group).map(|index| &mut self.retired_by_group[index]) {
            *counter = counter.saturating_add(1);
        }
    }

    /// Retired instructions of `group`.
    #[must_use]
    pub fn instruction_count_for(&self, group: DecodeGroup) -> u64 {
        group_index(group).map_or(0, |index| self.retired_by_group[index])
    }

    /// Records a program leaving the unit.
    #[allow(clippy::missing_const_for_fn)]
    pub fn record_program(&mut self, interrupted: bool) {
        self.programs_handled = self.programs_handled.saturating_add(1);
        if interrupted {
            self.programs_interrupted = self.programs_interrupted.saturating_add(1);
        }
    }

    /// Resets every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn group_index(group: DecodeGroup) -> Option<usize> {
    DecodeGroup::ALL.iter().position(|candidate| *candidate == group)
}

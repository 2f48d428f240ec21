/// Execution status of a processing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum UnitStatus {
    /// Waiting for a program.
    #[default]
    Idle,
    /// Retiring instructions of a program.
    Running,
    /// Stopped at an instruction boundary; accepts no further programs.
    Interrupted,
}

impl UnitStatus {
    /// Returns `true` when the unit can still accept programs.
    #[must_use]
    pub const fn accepts_programs(self) -> bool {
        !matches!(self, Self::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::UnitStatus;

    #[test]
    fn default_is_idle() {
        assert_eq!(UnitStatus::default(), UnitStatus::Idle);
    }

    #[test]
    fn only_interrupted_refuses_programs() {
        assert!(UnitStatus::Idle.accepts_programs());
        assert!(UnitStatus::Running.accepts_programs());
        assert!(!UnitStatus::Interrupted.accepts_programs());
    }
}

//! Per-unit data address map.
//!
//! Byte addresses inside the stack window land in the unit's private stack;
//! every other address is a word address into the cache hierarchy.

use super::{Address, DATA_UNIT_BYTES};
use crate::fault::FaultCode;

/// Byte address of the lowest word of every unit's private stack.
pub const STACK_BASE: u64 = 0x0000_7FFF_0000_0000;

/// Return address installed in X30 at program start; branching here ends the program.
pub const PROGRAM_EXIT_ADDRESS: u64 = u64::MAX;

const _: () = assert!(STACK_BASE % DATA_UNIT_BYTES == 0, "stack base must be word aligned");

/// Memory a data access resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataRegion {
    /// The unit's private stack.
    Stack,
    /// The shared hierarchy behind the unit's L1.
    Hierarchy,
}

/// Resolved word location of a data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataTarget {
    /// Target memory.
    pub region: DataRegion,
    /// First word address inside that memory.
    pub word: Address,
}

/// Address map for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataMap {
    stack_units: u64,
    hierarchy_units: u64,
}

impl DataMap {
    /// Creates a map for a stack of `stack_units` words over a hierarchy of
    /// `hierarchy_units` words.
    #[must_use]
    pub const fn new(stack_units: u64, hierarchy_units: u64) -> Self {
        Self {
            stack_units,
            hierarchy_units,
        }
    }

    /// Byte address one past the top of the stack (the initial SP).
    #[must_use]
    pub const fn stack_top(&self) -> u64 {
        STACK_BASE + self.stack_units * DATA_UNIT_BYTES
    }

    /// Resolves a `bytes`-wide access at byte address `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::UnalignedAccess`] when `addr` is not word aligned
    /// and [`FaultCode::DataAbort`] when any byte of the access falls outside
    /// the stack window and outside the hierarchy.
    pub const fn resolve(&self, addr: u64, bytes: u64) -> Result<DataTarget, FaultCode> {
        if addr % DATA_UNIT_BYTES != 0 {
            return Err(FaultCode::UnalignedAccess);
        }
        let Some(end) = addr.checked_add(bytes) else {
            return Err(FaultCode::DataAbort);
        };
        if addr >= STACK_BASE && addr < self.stack_top() {
            if end > self.stack_top() {
                return Err(FaultCode::DataAbort);
            }
            return Ok(DataTarget {
                region: DataRegion::Stack,
                word: (addr - STACK_BASE) / DATA_UNIT_BYTES,
            });
        }
        if end.div_ceil(DATA_UNIT_BYTES) > self.hierarchy_units {
            return Err(FaultCode::DataAbort);
        }
        Ok(DataTarget {
            region: DataRegion::Hierarchy,
            word: addr / DATA_UNIT_BYTES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DataMap, DataRegion, DataTarget, STACK_BASE};
    use crate::fault::FaultCode;

    const MAP: DataMap = DataMap::new(16, 1024);

    #[test]
    fn stack_window_resolves_to_private_words() {
        assert_eq!(MAP.stack_top(), STACK_BASE + 64);
        assert_eq!(
            MAP.resolve(STACK_BASE + 12, 4),
            Ok(DataTarget {
                region: DataRegion::Stack,
                word: 3
            })
        );
        assert_eq!(
            MAP.resolve(STACK_BASE + 56, 8).map(|t| t.word),
            Ok(14)
        );
    }

    #[test]
    fn access_running_off_the_stack_top_aborts() {
        assert_eq!(MAP.resolve(STACK_BASE + 60, 8), Err(FaultCode::DataAbort));
        assert_eq!(
            MAP.resolve(STACK_BASE + 64, 4),
            Err(FaultCode::DataAbort)
        );
    }

    #[test]
    fn other_addresses_go_to_the_hierarchy() {
        assert_eq!(
            MAP.resolve(400, 4),
            Ok(DataTarget {
                region: DataRegion::Hierarchy,
                word: 100
            })
        );
        assert_eq!(MAP.resolve(4092, 4).map(|t| t.word), Ok(1023));
        assert_eq!(MAP.resolve(4092, 8), Err(FaultCode::DataAbort));
        assert_eq!(MAP.resolve(4096, 4), Err(FaultCode::DataAbort));
    }

    #[test]
    fn misaligned_addresses_fault_before_range_checks() {
        assert_eq!(MAP.resolve(2, 4), Err(FaultCode::UnalignedAccess));
        assert_eq!(
            MAP.resolve(STACK_BASE + 1, 4),
            Err(FaultCode::UnalignedAccess)
        );
        assert_eq!(MAP.resolve(u64::MAX, 4), Err(FaultCode::UnalignedAccess));
    }

    #[test]
    fn wrapping_access_aborts() {
        assert_eq!(MAP.resolve(u64::MAX - 3, 8), Err(FaultCode::DataAbort));
        assert_eq!(MAP.resolve(u64::MAX - 7, 16), Err(FaultCode::DataAbort));
    }
}

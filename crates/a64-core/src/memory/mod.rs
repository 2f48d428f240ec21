//! Word-granular memory contract, backing store and cache hierarchy.

/// Direct-mapped write-through cache decorator.
pub mod cache;
/// Per-unit data address map.
pub mod map;
/// Zero-initialised backing store.
pub mod ram;
/// Mutex-guarded handle for memories shared between units.
pub mod shared;
/// L1 and private stack of one processing unit.
pub mod unit;
/// Hit/miss accounting.
pub mod watcher;

pub use cache::{
    CacheConfig, CacheConfigError, CacheMemory, Mapping, UnitState, WriteStrategy,
    CACHE_LINE_SIZE, MAX_CACHE_SIZE,
};
pub use map::{DataMap, DataRegion, DataTarget, PROGRAM_EXIT_ADDRESS, STACK_BASE};
pub use ram::Ram;
pub use shared::SharedMemory;
pub use unit::UnitMemory;
pub use watcher::{AccessKind, AccessResult, AccessStats, MemoryWatcher};

/// Memory word granularity (32 bits).
pub type DataUnit = u32;

/// Word address inside a memory.
pub type Address = u64;

/// Bytes per [`DataUnit`].
pub const DATA_UNIT_BYTES: u64 = 4;

/// Word-addressed memory with single and block access.
///
/// Addresses at or beyond [`Memory::size`] and blocks that violate an
/// implementation's boundary rules are caller errors; implementations panic.
pub trait Memory: Send {
    /// Reads one word.
    fn read(&mut self, addr: Address) -> DataUnit;

    /// Writes one word.
    fn write(&mut self, addr: Address, value: DataUnit);

    /// Reads `count` contiguous words starting at `start`.
    fn read_block(&mut self, start: Address, count: usize) -> Vec<DataUnit>;

    /// Writes `data` contiguously starting at `start`.
    fn write_block(&mut self, start: Address, data: &[DataUnit]);

    /// Number of addressable words. Fixed after construction.
    fn size(&self) -> u64;

    /// Snapshot of the access counters.
    fn stats(&self) -> AccessStats;

    /// Component name used in trace events.
    fn name(&self) -> &str;
}

/// Panics unless `[start, start + count)` lies inside `[0, size)`.
pub(crate) fn check_range(name: &str, size: u64, start: Address, count: usize) {
    let end = start.checked_add(count as u64);
    assert!(
        end.is_some_and(|end| end <= size),
        "{name}: access of {count} units at {start:#x} is outside {size} units"
    );
}

#[cfg(test)]
mod tests {
    use super::check_range;

    #[test]
    fn range_check_accepts_exact_fit() {
        check_range("ram", 16, 0, 16);
        check_range("ram", 16, 15, 1);
        check_range("ram", 16, 16, 0);
    }

    #[test]
    #[should_panic(expected = "outside 16 units")]
    fn range_check_rejects_overrun() {
        check_range("ram", 16, 15, 2);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn range_check_rejects_wrapping() {
        check_range("ram", 16, u64::MAX, 2);
    }
}

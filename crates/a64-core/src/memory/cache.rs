//! Direct-mapped write-through cache placed in front of an upstream memory.
//!
//! The cache covers one `size`-word segment of the upstream address space
//! per line slot. A word address splits into
//! `segment = addr / size`, `line = (addr % size) / CACHE_LINE_SIZE` and
//! `offset = addr % CACHE_LINE_SIZE`.
//!
//! Reads miss when the line belongs to another segment (or was never filled)
//! and refill the whole line. Writes to a line of another segment bypass the
//! cache; writes to a resident line update it and push the line upstream
//! before returning, so cache and upstream never diverge.

use thiserror::Error;

use super::{
    check_range, AccessKind, AccessResult, AccessStats, Address, DataUnit, Memory, MemoryWatcher,
};
use crate::api::{SharedSink, TraceEvent};

/// Words per cache line.
pub const CACHE_LINE_SIZE: u64 = 64;

/// Largest supported cache, in words.
pub const MAX_CACHE_SIZE: u64 = 32 * 1024 * 1024;

const LINE: usize = CACHE_LINE_SIZE as usize;

/// Write policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum WriteStrategy {
    /// Every write reaches upstream before the call returns.
    #[default]
    WriteThrough,
    /// Writes stay in the cache until eviction.
    WriteBack,
}

/// Placement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Mapping {
    /// Each upstream line has exactly one slot.
    #[default]
    Direct,
    /// Any upstream line may occupy any slot.
    FullyAssociative,
    /// Each upstream line maps to a set of slots.
    SetAssociative,
}

/// Cache policy pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CacheConfig {
    /// Write policy.
    pub write_strategy: WriteStrategy,
    /// Placement policy.
    pub mapping: Mapping,
}

impl CacheConfig {
    /// Creates a policy pair.
    #[must_use]
    pub const fn new(write_strategy: WriteStrategy, mapping: Mapping) -> Self {
        Self {
            write_strategy,
            mapping,
        }
    }

    /// Returns `true` for the only implemented combination.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(
            (self.write_strategy, self.mapping),
            (WriteStrategy::WriteThrough, Mapping::Direct)
        )
    }
}

/// Cache construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheConfigError {
    /// The policy pair has no implementation.
    #[error("unsupported cache configuration: {write_strategy:?} with {mapping:?} mapping")]
    Unsupported {
        /// Requested write policy.
        write_strategy: WriteStrategy,
        /// Requested placement policy.
        mapping: Mapping,
    },
    /// Size was zero.
    #[error("cache size must be positive")]
    ZeroSize,
    /// Size is not a whole number of lines.
    #[error("cache size {size} is not a multiple of the {CACHE_LINE_SIZE}-unit line")]
    NotLineMultiple {
        /// Requested size in words.
        size: u64,
    },
    /// Size exceeds [`MAX_CACHE_SIZE`].
    #[error("cache size {size} exceeds the maximum of {MAX_CACHE_SIZE} units")]
    TooLarge {
        /// Requested size in words.
        size: u64,
    },
    /// Size exceeds the memory behind the cache.
    #[error("cache size {size} exceeds its upstream size {upstream}")]
    LargerThanUpstream {
        /// Requested size in words.
        size: u64,
        /// Upstream size in words.
        upstream: u64,
    },
}

/// Per-word state inside a cache line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum UnitState {
    /// Never filled.
    #[default]
    Empty,
    /// Matches upstream.
    Clean,
    /// Updated locally and not yet written through.
    Modified,
}

#[derive(Clone)]
struct CacheLine {
    segment: Option<u64>,
    data: [DataUnit; LINE],
    states: [UnitState; LINE],
}

impl CacheLine {
    const EMPTY: Self = Self {
        segment: None,
        data: [0; LINE],
        states: [UnitState::Empty; LINE],
    };
}

/// Direct-mapped write-through cache decorator.
pub struct CacheMemory {
    name: String,
    config: CacheConfig,
    capacity: u64,
    upstream: Box<dyn Memory>,
    lines: Vec<CacheLine>,
    watcher: MemoryWatcher,
    sink: SharedSink,
}

impl CacheMemory {
    /// Builds a cache of `size` words in front of `upstream`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheConfigError`] when the policy pair is not implemented
    /// or the size is zero, not line aligned, too large, or larger than
    /// `upstream`.
    pub fn try_new(
        name: impl Into<String>,
        config: CacheConfig,
        upstream: Box<dyn Memory>,
        size: u64,
        sink: SharedSink,
    ) -> Result<Self, CacheConfigError> {
        if !config.is_supported() {
            return Err(CacheConfigError::Unsupported {
                write_strategy: config.write_strategy,
                mapping: config.mapping,
            });
        }
        if size == 0 {
            return Err(CacheConfigError::ZeroSize);
        }
        if size % CACHE_LINE_SIZE != 0 {
            return Err(CacheConfigError::NotLineMultiple { size });
        }
        if size > MAX_CACHE_SIZE {
            return Err(CacheConfigError::TooLarge { size });
        }
        if size > upstream.size() {
            return Err(CacheConfigError::LargerThanUpstream {
                size,
                upstream: upstream.size(),
            });
        }

        let name = name.into();
        sink.on_event(TraceEvent::Construction {
            component: &name,
            detail: &format!("{size} units in front of {}", upstream.name()),
        });
        #[allow(clippy::cast_possible_truncation)]
        let line_count = (size / CACHE_LINE_SIZE) as usize;
        Ok(Self {
            name,
            config,
            capacity: size,
            upstream,
            lines: vec![CacheLine::EMPTY; line_count],
            watcher: MemoryWatcher::new(),
            sink,
        })
    }

    /// Builds a cache, treating every configuration error as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the [`CacheConfigError`] message when [`Self::try_new`]
    /// would fail.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        config: CacheConfig,
        upstream: Box<dyn Memory>,
        size: u64,
        sink: SharedSink,
    ) -> Self {
        Self::try_new(name, config, upstream, size, sink).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Cache capacity in words.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of line slots.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Policy pair this cache was built with.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Counters of the memory behind this cache.
    #[must_use]
    pub fn upstream_stats(&self) -> AccessStats {
        self.upstream.stats()
    }

    /// Returns the cached copy of `addr` without touching counters or
    /// upstream. `None` when the word is not resident and clean.
    #[must_use]
    pub fn resident(&self, addr: Address) -> Option<DataUnit> {
        if addr >= self.size() {
            return None;
        }
        let (segment, line, offset) = self.locate(addr);
        let entry = &self.lines[line];
        (entry.segment == Some(segment) && entry.states[offset] == UnitState::Clean)
            .then_some(entry.data[offset])
    }

    /// Returns the state of `addr`'s slot for the segment `addr` belongs to.
    #[must_use]
    pub fn state(&self, addr: Address) -> UnitState {
        if addr >= self.size() {
            return UnitState::Empty;
        }
        let (segment, line, offset) = self.locate(addr);
        let entry = &self.lines[line];
        if entry.segment == Some(segment) {
            entry.states[offset]
        } else {
            UnitState::Empty
        }
    }

    /// Drops every resident line. Upstream is unaffected.
    pub fn clear(&mut self) {
        self.lines.fill(CacheLine::EMPTY);
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn locate(&self, addr: Address) -> (u64, usize, usize) {
        let segment = addr / self.capacity;
        let line = ((addr % self.capacity) / CACHE_LINE_SIZE) as usize;
        let offset = (addr % CACHE_LINE_SIZE) as usize;
        (segment, line, offset)
    }

    const fn line_base(&self, segment: u64, line: usize) -> Address {
        segment * self.capacity + line as u64 * CACHE_LINE_SIZE
    }

    #[allow(clippy::cast_possible_truncation)]
    fn valid_len(&self, base: Address) -> usize {
        self.upstream.size().saturating_sub(base).min(CACHE_LINE_SIZE) as usize
    }

    fn record(&mut self, kind: AccessKind, result: AccessResult, address: Address) {
        self.watcher.record(kind, result);
        self.sink.on_event(TraceEvent::MemoryAccess {
            component: &self.name,
            kind,
            result,
            address,
        });
    }

    fn check_block(&self, start: Address, count: usize) {
        check_range(&self.name, self.size(), start, count);
        let (_, _, offset) = self.locate(start);
        assert!(
            offset + count <= LINE,
            "{}: block of {count} units at {start:#x} crosses a cache line",
            self.name
        );
    }

    fn fill(&mut self, segment: u64, line: usize) {
        let base = self.line_base(segment, line);
        let len = self.valid_len(base);
        self.record(AccessKind::UpstreamReadBlock, AccessResult::Miss, base);
        let words = self.upstream.read_block(base, len);
        let entry = &mut self.lines[line];
        entry.segment = Some(segment);
        entry.data = [0; LINE];
        entry.states = [UnitState::Empty; LINE];
        entry.data[..len].copy_from_slice(&words);
        entry.states[..len].fill(UnitState::Clean);
    }

    fn write_through(&mut self, segment: u64, line: usize) {
        let base = self.line_base(segment, line);
        let len = self.valid_len(base);
        self.record(AccessKind::UpstreamWriteBlock, AccessResult::Miss, base);
        let entry = &mut self.lines[line];
        self.upstream.write_block(base, &entry.data[..len]);
        for state in &mut entry.states[..len] {
            if *state == UnitState::Modified {
                *state = UnitState::Clean;
            }
        }
    }

    fn is_resident(&self, segment: u64, line: usize) -> bool {
        self.lines[line].segment == Some(segment)
    }
}

impl Memory for CacheMemory {
    fn read(&mut self, addr: Address) -> DataUnit {
        check_range(&self.name, self.size(), addr, 1);
        let (segment, line, offset) = self.locate(addr);
        if self.is_resident(segment, line) && self.lines[line].states[offset] == UnitState::Clean
        {
            self.record(AccessKind::Read, AccessResult::Hit, addr);
            return self.lines[line].data[offset];
        }
        self.record(AccessKind::Read, AccessResult::Miss, addr);
        self.fill(segment, line);
        self.lines[line].data[offset]
    }

    fn write(&mut self, addr: Address, value: DataUnit) {
        check_range(&self.name, self.size(), addr, 1);
        let (segment, line, offset) = self.locate(addr);
        if !self.is_resident(segment, line) {
            self.record(AccessKind::Write, AccessResult::Miss, addr);
            self.record(AccessKind::UpstreamWrite, AccessResult::Miss, addr);
            self.upstream.write(addr, value);
            return;
        }
        self.record(AccessKind::Write, AccessResult::Hit, addr);
        let entry = &mut self.lines[line];
        entry.data[offset] = value;
        entry.states[offset] = UnitState::Modified;
        self.write_through(segment, line);
    }

    fn read_block(&mut self, start: Address, count: usize) -> Vec<DataUnit> {
        self.check_block(start, count);
        if count == 0 {
            self.record(AccessKind::ReadBlock, AccessResult::Hit, start);
            return Vec::new();
        }
        let (segment, line, offset) = self.locate(start);
        let range = offset..offset + count;
        let hit = self.is_resident(segment, line)
            && self.lines[line].states[range.clone()]
                .iter()
                .all(|state| *state == UnitState::Clean);
        if hit {
            self.record(AccessKind::ReadBlock, AccessResult::Hit, start);
        } else {
            self.record(AccessKind::ReadBlock, AccessResult::Miss, start);
            self.fill(segment, line);
        }
        self.lines[line].data[range].to_vec()
    }

    fn write_block(&mut self, start: Address, data: &[DataUnit]) {
        self.check_block(start, data.len());
        if data.is_empty() {
            self.record(AccessKind::WriteBlock, AccessResult::Hit, start);
            return;
        }
        let (segment, line, offset) = self.locate(start);
        if !self.is_resident(segment, line) {
            self.record(AccessKind::WriteBlock, AccessResult::Miss, start);
            self.record(AccessKind::UpstreamWriteBlock, AccessResult::Miss, start);
            self.upstream.write_block(start, data);
            return;
        }
        self.record(AccessKind::WriteBlock, AccessResult::Hit, start);
        let entry = &mut self.lines[line];
        let range = offset..offset + data.len();
        entry.data[range.clone()].copy_from_slice(data);
        entry.states[range].fill(UnitState::Modified);
        self.write_through(segment, line);
    }

    fn size(&self) -> u64 {
        self.upstream.size()
    }

    fn stats(&self) -> AccessStats {
        self.watcher.stats()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        CacheConfig, CacheConfigError, CacheMemory, Mapping, UnitState, WriteStrategy,
        CACHE_LINE_SIZE,
    };
    use crate::api::null_sink;
    use crate::memory::{AccessKind, Memory, Ram, SharedMemory};

    fn cache_over_ram(cache: u64, ram: u64) -> (CacheMemory, SharedMemory) {
        let ram = SharedMemory::new(Box::new(Ram::new("RAM", ram, null_sink())));
        let cache = CacheMemory::new(
            "L1[0]",
            CacheConfig::default(),
            Box::new(ram.clone()),
            cache,
            null_sink(),
        );
        (cache, ram)
    }

    #[rstest]
    #[case(WriteStrategy::WriteBack, Mapping::Direct)]
    #[case(WriteStrategy::WriteThrough, Mapping::FullyAssociative)]
    #[case(WriteStrategy::WriteThrough, Mapping::SetAssociative)]
    #[case(WriteStrategy::WriteBack, Mapping::SetAssociative)]
    fn unimplemented_policies_are_rejected(
        #[case] write_strategy: WriteStrategy,
        #[case] mapping: Mapping,
    ) {
        let ram = Box::new(Ram::new("RAM", 256, null_sink()));
        let result = CacheMemory::try_new(
            "L1",
            CacheConfig::new(write_strategy, mapping),
            ram,
            64,
            null_sink(),
        );
        assert_eq!(
            result.err(),
            Some(CacheConfigError::Unsupported {
                write_strategy,
                mapping
            })
        );
    }

    #[rstest]
    #[case(0, CacheConfigError::ZeroSize)]
    #[case(100, CacheConfigError::NotLineMultiple { size: 100 })]
    #[case(512, CacheConfigError::LargerThanUpstream { size: 512, upstream: 256 })]
    fn bad_sizes_are_rejected(#[case] size: u64, #[case] expected: CacheConfigError) {
        let ram = Box::new(Ram::new("RAM", 256, null_sink()));
        let result = CacheMemory::try_new("L1", CacheConfig::default(), ram, size, null_sink());
        assert_eq!(result.err(), Some(expected));
    }

    #[test]
    #[should_panic(expected = "unsupported cache configuration")]
    fn infallible_constructor_treats_unsupported_policy_as_fatal() {
        let ram = Box::new(Ram::new("RAM", 256, null_sink()));
        let _ = CacheMemory::new(
            "L1",
            CacheConfig::new(WriteStrategy::WriteBack, Mapping::Direct),
            ram,
            64,
            null_sink(),
        );
    }

    #[test]
    fn first_read_misses_and_fills_the_line() {
        let (mut cache, mut ram) = cache_over_ram(128, 1024);
        ram.write(5, 55);
        ram.write(63, 63);

        assert_eq!(cache.read(5), 55);
        assert_eq!(cache.stats().misses(AccessKind::Read), 1);
        assert_eq!(cache.stats().misses(AccessKind::UpstreamReadBlock), 1);

        assert_eq!(cache.read(63), 63);
        assert_eq!(cache.stats().hits(AccessKind::Read), 1);
        assert_eq!(cache.resident(5), Some(55));
        assert_eq!(cache.state(0), UnitState::Clean);
    }

    #[test]
    fn other_segment_evicts_on_read() {
        let (mut cache, mut ram) = cache_over_ram(128, 1024);
        ram.write(7, 1);
        ram.write(128 + 7, 2);

        assert_eq!(cache.read(7), 1);
        assert_eq!(cache.read(128 + 7), 2);
        assert_eq!(cache.resident(7), None);
        assert_eq!(cache.read(7), 1);
        assert_eq!(cache.stats().misses(AccessKind::Read), 3);
    }

    #[test]
    fn write_to_foreign_segment_bypasses_the_cache() {
        let (mut cache, mut ram) = cache_over_ram(128, 1024);
        let _ = cache.read(0);
        cache.write(128, 9);

        assert_eq!(ram.read(128), 9);
        assert_eq!(cache.resident(128), None);
        assert_eq!(cache.state(0), UnitState::Clean);
        assert_eq!(cache.stats().misses(AccessKind::Write), 1);
        assert_eq!(cache.stats().misses(AccessKind::UpstreamWrite), 1);
    }

    #[test]
    fn resident_write_goes_through_immediately() {
        let (mut cache, mut ram) = cache_over_ram(128, 1024);
        let _ = cache.read(10);
        cache.write(10, 0xABCD);

        assert_eq!(cache.stats().hits(AccessKind::Write), 1);
        assert_eq!(cache.state(10), UnitState::Clean);
        assert_eq!(ram.read(10), 0xABCD);
        assert_eq!(cache.read(10), 0xABCD);
    }

    #[test]
    fn block_operations_stay_inside_one_line() {
        let (mut cache, mut ram) = cache_over_ram(128, 1024);
        cache.write_block(64, &[1, 2, 3, 4]);
        assert_eq!(ram.read_block(64, 4), vec![1, 2, 3, 4]);

        assert_eq!(cache.read_block(64, 4), vec![1, 2, 3, 4]);
        assert_eq!(cache.stats().misses(AccessKind::ReadBlock), 1);
        cache.write_block(66, &[7]);
        assert_eq!(cache.read_block(64, 4), vec![1, 2, 7, 4]);
        assert_eq!(cache.stats().hits(AccessKind::ReadBlock), 1);
        assert_eq!(ram.read(66), 7);
    }

    #[test]
    #[should_panic(expected = "crosses a cache line")]
    fn block_crossing_a_line_panics() {
        let (mut cache, _) = cache_over_ram(128, 1024);
        let _ = cache.read_block(CACHE_LINE_SIZE - 2, 4);
    }

    #[test]
    #[should_panic(expected = "outside 1024 units")]
    fn out_of_range_address_panics() {
        let (mut cache, _) = cache_over_ram(128, 1024);
        let _ = cache.read(1024);
    }

    #[test]
    fn clear_drops_lines_but_keeps_upstream() {
        let (mut cache, _) = cache_over_ram(128, 1024);
        let _ = cache.read(3);
        cache.write(3, 4);
        cache.clear();
        assert_eq!(cache.resident(3), None);
        assert_eq!(cache.read(3), 4);
    }

    #[test]
    fn caches_stack_into_a_hierarchy() {
        let ram = SharedMemory::new(Box::new(Ram::new("RAM", 4096, null_sink())));
        let l3 = CacheMemory::new(
            "L3",
            CacheConfig::default(),
            Box::new(ram.clone()),
            1024,
            null_sink(),
        );
        let l2 = CacheMemory::new(
            "L2[0]",
            CacheConfig::default(),
            Box::new(SharedMemory::new(Box::new(l3))),
            256,
            null_sink(),
        );
        let mut l1 = CacheMemory::new("L1[0]", CacheConfig::default(), Box::new(l2), 64, null_sink());

        assert_eq!(l1.size(), 4096);
        assert_eq!(l1.capacity(), 64);
        let _ = l1.read(2000);
        l1.write(2000, 77);
        assert_eq!(ram.clone().read(2000), 77);
        assert_eq!(l1.upstream_stats().misses(AccessKind::ReadBlock), 1);
    }
}

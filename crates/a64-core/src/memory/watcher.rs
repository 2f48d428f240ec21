//! Per-access-kind hit/miss accounting for memories and caches.

/// Access categories tracked by [`MemoryWatcher`].
///
/// `Upstream*` kinds count the traffic a cache exchanges with the memory
/// behind it rather than calls made on the cache itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AccessKind {
    /// Single-word read.
    Read,
    /// Contiguous multi-word read.
    ReadBlock,
    /// Single-word write.
    Write,
    /// Contiguous multi-word write.
    WriteBlock,
    /// Block read forwarded upstream (line fill).
    UpstreamReadBlock,
    /// Single-word write forwarded upstream (bypass).
    UpstreamWrite,
    /// Block write forwarded upstream (write-through or bypass).
    UpstreamWriteBlock,
}

impl AccessKind {
    /// Every access kind in counter order.
    pub const ALL: [Self; 7] = [
        Self::Read,
        Self::ReadBlock,
        Self::Write,
        Self::WriteBlock,
        Self::UpstreamReadBlock,
        Self::UpstreamWrite,
        Self::UpstreamWriteBlock,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the three kinds that read data.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadBlock | Self::UpstreamReadBlock)
    }

    /// Returns `true` for kinds that describe upstream traffic.
    #[must_use]
    pub const fn is_upstream(self) -> bool {
        matches!(
            self,
            Self::UpstreamReadBlock | Self::UpstreamWrite | Self::UpstreamWriteBlock
        )
    }

    /// Stable lowercase label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadBlock => "read_block",
            Self::Write => "write",
            Self::WriteBlock => "write_block",
            Self::UpstreamReadBlock => "upstream_read_block",
            Self::UpstreamWrite => "upstream_write",
            Self::UpstreamWriteBlock => "upstream_write_block",
        }
    }
}

/// Outcome of one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AccessResult {
    /// Served from this level.
    Hit,
    /// Required the level behind this one.
    Miss,
}

impl AccessResult {
    /// Stable lowercase label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

const KIND_COUNT: usize = AccessKind::ALL.len();

/// Immutable snapshot of a [`MemoryWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AccessStats {
    hits: [u64; KIND_COUNT],
    misses: [u64; KIND_COUNT],
}

impl AccessStats {
    /// Hits recorded for `kind`.
    #[must_use]
    pub const fn hits(&self, kind: AccessKind) -> u64 {
        self.hits[kind.index()]
    }

    /// Misses recorded for `kind`.
    #[must_use]
    pub const fn misses(&self, kind: AccessKind) -> u64 {
        self.misses[kind.index()]
    }

    /// Total accesses recorded for `kind`.
    #[must_use]
    pub const fn count(&self, kind: AccessKind) -> u64 {
        self.hits(kind) + self.misses(kind)
    }

    /// Hits across the four caller-facing kinds.
    #[must_use]
    pub fn total_hits(&self) -> u64 {
        Self::caller_kinds().map(|kind| self.hits(kind)).sum()
    }

    /// Misses across the four caller-facing kinds.
    #[must_use]
    pub fn total_misses(&self) -> u64 {
        Self::caller_kinds().map(|kind| self.misses(kind)).sum()
    }

    /// Caller-facing reads (single and block).
    #[must_use]
    pub const fn reads(&self) -> u64 {
        self.count(AccessKind::Read) + self.count(AccessKind::ReadBlock)
    }

    /// Caller-facing writes (single and block).
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.count(AccessKind::Write) + self.count(AccessKind::WriteBlock)
    }

    /// Caller-facing accesses of every kind.
    #[must_use]
    pub const fn accesses(&self) -> u64 {
        self.reads() + self.writes()
    }

    /// Fraction of caller-facing accesses that hit, `0.0` when idle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        let accesses = self.accesses();
        if accesses == 0 {
            return 0.0;
        }
        self.total_hits() as f64 / accesses as f64
    }

    /// Fraction of caller-facing accesses that missed, `0.0` when idle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn miss_ratio(&self) -> f64 {
        let accesses = self.accesses();
        if accesses == 0 {
            return 0.0;
        }
        self.total_misses() as f64 / accesses as f64
    }

    fn caller_kinds() -> impl Iterator<Item = AccessKind> {
        AccessKind::ALL.into_iter().filter(|kind| !kind.is_upstream())
    }
}

/// Mutable hit/miss counters owned by one memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWatcher {
    stats: AccessStats,
}

impl MemoryWatcher {
    /// Creates a watcher with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one access.
    pub fn record(&mut self, kind: AccessKind, result: AccessResult) {
        let counters = match result {
            AccessResult::Hit => &mut self.stats.hits,
            AccessResult::Miss => &mut self.stats.misses,
        };
        counters[kind.index()] = counters[kind.index()].saturating_add(1);
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub const fn stats(&self) -> AccessStats {
        self.stats
    }

    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        self.stats = AccessStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessKind, AccessResult, MemoryWatcher};

    #[test]
    fn counters_are_independent_per_kind() {
        let mut watcher = MemoryWatcher::new();
        watcher.record(AccessKind::Read, AccessResult::Hit);
        watcher.record(AccessKind::Read, AccessResult::Miss);
        watcher.record(AccessKind::WriteBlock, AccessResult::Hit);
        watcher.record(AccessKind::UpstreamReadBlock, AccessResult::Miss);

        let stats = watcher.stats();
        assert_eq!(stats.hits(AccessKind::Read), 1);
        assert_eq!(stats.misses(AccessKind::Read), 1);
        assert_eq!(stats.count(AccessKind::WriteBlock), 1);
        assert_eq!(stats.count(AccessKind::Write), 0);
        assert_eq!(stats.misses(AccessKind::UpstreamReadBlock), 1);
    }

    #[test]
    fn totals_exclude_upstream_traffic() {
        let mut watcher = MemoryWatcher::new();
        watcher.record(AccessKind::Read, AccessResult::Hit);
        watcher.record(AccessKind::Write, AccessResult::Miss);
        watcher.record(AccessKind::UpstreamWrite, AccessResult::Miss);

        let stats = watcher.stats();
        assert_eq!(stats.accesses(), 2);
        assert_eq!(stats.total_hits(), 1);
        assert_eq!(stats.total_misses(), 1);
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn idle_ratios_are_zero_and_reset_clears() {
        let mut watcher = MemoryWatcher::new();
        assert!(watcher.stats().hit_ratio().abs() < f64::EPSILON);
        watcher.record(AccessKind::ReadBlock, AccessResult::Hit);
        watcher.reset();
        assert_eq!(watcher.stats().accesses(), 0);
    }

    #[test]
    fn kind_classification_is_consistent() {
        assert_eq!(AccessKind::ALL.iter().filter(|k| k.is_upstream()).count(), 3);
        assert_eq!(AccessKind::ALL.iter().filter(|k| k.is_read()).count(), 3);
        assert_eq!(AccessKind::UpstreamWriteBlock.as_str(), "upstream_write_block");
        assert_eq!(AccessResult::Miss.as_str(), "miss");
    }
}

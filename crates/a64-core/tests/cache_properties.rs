//! Write-through and direct-mapping properties of a two-level hierarchy.

use a64_core as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

use a64_core::{
    null_sink, AccessKind, CacheConfig, CacheConfigError, CacheMemory, Mapping,
    Memory, Ram, SharedMemory, WriteStrategy, CACHE_LINE_SIZE,
};
use proptest::prelude::*;
use rstest::rstest;

const RAM_SIZE: u64 = 1024;
const L2_SIZE: u64 = 256;
const L1_SIZE: u64 = 128;

struct Hierarchy {
    ram: SharedMemory,
    l2: SharedMemory,
    l1: CacheMemory,
}

fn hierarchy() -> Hierarchy {
    let ram = SharedMemory::new(Box::new(Ram::new("RAM", RAM_SIZE, null_sink())));
    let l2 = SharedMemory::new(Box::new(CacheMemory::new(
        "L2",
        CacheConfig::default(),
        Box::new(ram.clone()),
        L2_SIZE,
        null_sink(),
    )));
    let l1 = CacheMemory::new(
        "L1",
        CacheConfig::default(),
        Box::new(l2.clone()),
        L1_SIZE,
        null_sink(),
    );
    Hierarchy { ram, l2, l1 }
}

#[derive(Debug, Clone)]
enum Op {
    Read(u64),
    Write(u64, u32),
    ReadBlock(u64, usize),
    WriteBlock(u64, Vec<u32>),
}

/// Longest block starting at `addr` that stays inside its cache line.
#[allow(clippy::cast_possible_truncation)]
fn line_room(addr: u64) -> usize {
    (CACHE_LINE_SIZE - addr % CACHE_LINE_SIZE) as usize
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..RAM_SIZE).prop_map(Op::Read),
        (0..RAM_SIZE, any::<u32>()).prop_map(|(addr, value)| Op::Write(addr, value)),
        (0..RAM_SIZE, 1..=16usize)
            .prop_map(|(addr, count)| Op::ReadBlock(addr, count.min(line_room(addr)))),
        (0..RAM_SIZE, prop::collection::vec(any::<u32>(), 1..=16)).prop_map(
            |(addr, mut data)| {
                data.truncate(line_room(addr));
                Op::WriteBlock(addr, data)
            }
        ),
    ]
}

/// Expected L1 counters, driven by which segment each line holds.
#[derive(Debug, Default)]
struct Tally {
    lines: [Option<u64>; (L1_SIZE / CACHE_LINE_SIZE) as usize],
    hits: [u64; AccessKind::ALL.len()],
    misses: [u64; AccessKind::ALL.len()],
}

impl Tally {
    #[allow(clippy::cast_possible_truncation)]
    fn slot(addr: u64) -> (usize, u64) {
        (((addr % L1_SIZE) / CACHE_LINE_SIZE) as usize, addr / L1_SIZE)
    }

    fn resident(&self, addr: u64) -> bool {
        let (line, segment) = Self::slot(addr);
        self.lines[line] == Some(segment)
    }

    fn bump(&mut self, kind: AccessKind, hit: bool) {
        let index = AccessKind::ALL
            .iter()
            .position(|candidate| *candidate == kind)
            .expect("listed kind");
        if hit {
            self.hits[index] += 1;
        } else {
            self.misses[index] += 1;
        }
    }

    fn read(&mut self, kind: AccessKind, addr: u64) {
        if self.resident(addr) {
            self.bump(kind, true);
        } else {
            self.bump(kind, false);
            self.bump(AccessKind::UpstreamReadBlock, false);
            let (line, segment) = Self::slot(addr);
            self.lines[line] = Some(segment);
        }
    }

    fn write(&mut self, kind: AccessKind, bypass: AccessKind, addr: u64) {
        if self.resident(addr) {
            self.bump(kind, true);
            self.bump(AccessKind::UpstreamWriteBlock, false);
        } else {
            self.bump(kind, false);
            self.bump(bypass, false);
        }
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Read(addr) => self.read(AccessKind::Read, addr),
            Op::ReadBlock(addr, _) => self.read(AccessKind::ReadBlock, addr),
            Op::Write(addr, _) => self.write(AccessKind::Write, AccessKind::UpstreamWrite, addr),
            Op::WriteBlock(addr, _) => {
                self.write(AccessKind::WriteBlock, AccessKind::UpstreamWriteBlock, addr);
            }
        }
    }
}

fn apply(h: &mut Hierarchy, model: &mut [u32], op: &Op) -> Result<(), TestCaseError> {
    match op {
        Op::Read(addr) => prop_assert_eq!(h.l1.read(*addr), model[*addr as usize]),
        Op::Write(addr, value) => {
            h.l1.write(*addr, *value);
            model[*addr as usize] = *value;
        }
        Op::ReadBlock(addr, count) => {
            let start = *addr as usize;
            prop_assert_eq!(h.l1.read_block(*addr, *count), model[start..start + *count].to_vec());
        }
        Op::WriteBlock(addr, data) => {
            h.l1.write_block(*addr, data);
            let start = *addr as usize;
            model[start..start + data.len()].copy_from_slice(data);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn reads_observe_latest_write_and_ram_never_lags(ops in prop::collection::vec(op(), 1..200)) {
        let mut h = hierarchy();
        let mut model = vec![0u32; RAM_SIZE as usize];
        for op in &ops {
            apply(&mut h, &mut model, op)?;
        }
        for (addr, expected) in model.iter().enumerate() {
            let stored = h.ram.with(|ram| ram.read(addr as u64));
            prop_assert_eq!(stored, *expected);
        }
    }

    #[test]
    fn every_access_kind_matches_the_residency_model(ops in prop::collection::vec(op(), 1..200)) {
        let mut h = hierarchy();
        let mut model = vec![0u32; RAM_SIZE as usize];
        let mut tally = Tally::default();
        for op in &ops {
            apply(&mut h, &mut model, op)?;
            tally.apply(op);
        }

        let stats = h.l1.stats();
        for (index, kind) in AccessKind::ALL.iter().enumerate() {
            prop_assert_eq!(stats.hits(*kind), tally.hits[index], "{} hits", kind.as_str());
            prop_assert_eq!(stats.misses(*kind), tally.misses[index], "{} misses", kind.as_str());
        }
        prop_assert_eq!(stats.accesses(), ops.len() as u64);

        // Every upstream transfer the L1 records is a call the L2 served.
        let upstream = h.l1.upstream_stats();
        prop_assert_eq!(upstream.count(AccessKind::ReadBlock), stats.count(AccessKind::UpstreamReadBlock));
        prop_assert_eq!(upstream.count(AccessKind::Write), stats.count(AccessKind::UpstreamWrite));
        prop_assert_eq!(upstream.count(AccessKind::WriteBlock), stats.count(AccessKind::UpstreamWriteBlock));
        prop_assert_eq!(upstream.count(AccessKind::Read), 0);
    }

    #[test]
    fn resident_words_match_upstream(ops in prop::collection::vec(op(), 1..100)) {
        let mut h = hierarchy();
        let mut model = vec![0u32; RAM_SIZE as usize];
        for op in &ops {
            apply(&mut h, &mut model, op)?;
        }
        for addr in 0..RAM_SIZE {
            if let Some(cached) = h.l1.resident(addr) {
                prop_assert_eq!(cached, h.l2.with(|l2| l2.read(addr)));
            }
        }
    }
}

#[test]
fn same_slot_in_another_segment_evicts() {
    let mut h = hierarchy();
    h.l1.read(0);
    h.l1.read(L1_SIZE);
    h.l1.read(0);
    let stats = h.l1.stats();
    assert_eq!(stats.misses(AccessKind::Read), 3);
    assert_eq!(stats.hits(AccessKind::Read), 0);

    h.l1.read(1);
    assert_eq!(h.l1.stats().hits(AccessKind::Read), 1);
}

#[test]
fn write_miss_bypasses_the_cache() {
    let mut h = hierarchy();
    h.l1.write(5, 0xDEAD_BEEF);
    assert_eq!(h.l1.resident(5), None);
    assert_eq!(h.ram.with(|ram| ram.read(5)), 0xDEAD_BEEF);
    assert_eq!(h.l1.read(5), 0xDEAD_BEEF);
    assert_eq!(h.l1.resident(5), Some(0xDEAD_BEEF));
}

#[rstest]
#[case(WriteStrategy::WriteBack, Mapping::Direct)]
#[case(WriteStrategy::WriteThrough, Mapping::FullyAssociative)]
#[case(WriteStrategy::WriteThrough, Mapping::SetAssociative)]
fn unimplemented_policies_are_rejected(#[case] write_strategy: WriteStrategy, #[case] mapping: Mapping) {
    let ram = Ram::new("RAM", RAM_SIZE, null_sink());
    let result = CacheMemory::try_new(
        "L1",
        CacheConfig::new(write_strategy, mapping),
        Box::new(ram),
        L1_SIZE,
        null_sink(),
    );
    assert!(matches!(result, Err(CacheConfigError::Unsupported { .. })));
}

#[rstest]
#[case(0)]
#[case(100)]
#[case(2 * RAM_SIZE)]
fn invalid_sizes_are_rejected(#[case] size: u64) {
    let ram = Ram::new("RAM", RAM_SIZE, null_sink());
    let result = CacheMemory::try_new("L1", CacheConfig::default(), Box::new(ram), size, null_sink());
    assert!(result.is_err());
}

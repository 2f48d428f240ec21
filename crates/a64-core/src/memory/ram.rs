use super::{
    check_range, AccessKind, AccessResult, AccessStats, Address, DataUnit, Memory, MemoryWatcher,
};
use crate::api::{SharedSink, TraceEvent};

/// Flat word store at the bottom of the hierarchy. Every access hits.
pub struct Ram {
    name: String,
    words: Vec<DataUnit>,
    watcher: MemoryWatcher,
    sink: SharedSink,
}

impl Ram {
    /// Allocates `size` zeroed words.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, sink: SharedSink) -> Self {
        let name = name.into();
        let words = vec![0; Self::index(size)];
        sink.on_event(TraceEvent::Construction {
            component: &name,
            detail: &format!("{size} units"),
        });
        Self {
            name,
            words,
            watcher: MemoryWatcher::new(),
            sink,
        }
    }

    /// Contents without recording an access.
    #[must_use]
    pub fn words(&self) -> &[DataUnit] {
        &self.words
    }

    fn record(&mut self, kind: AccessKind, address: Address) {
        self.watcher.record(kind, AccessResult::Hit);
        self.sink.on_event(TraceEvent::MemoryAccess {
            component: &self.name,
            kind,
            result: AccessResult::Hit,
            address,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn index(addr: Address) -> usize {
        addr as usize
    }
}

impl Memory for Ram {
    fn read(&mut self, addr: Address) -> DataUnit {
        check_range(&self.name, self.size(), addr, 1);
        self.record(AccessKind::Read, addr);
        self.words[Self::index(addr)]
    }

    fn write(&mut self, addr: Address, value: DataUnit) {
        check_range(&self.name, self.size(), addr, 1);
        self.record(AccessKind::Write, addr);
        self.words[Self::index(addr)] = value;
    }

    fn read_block(&mut self, start: Address, count: usize) -> Vec<DataUnit> {
        check_range(&self.name, self.size(), start, count);
        self.record(AccessKind::ReadBlock, start);
        let start = Self::index(start);
        self.words[start..start + count].to_vec()
    }

    fn write_block(&mut self, start: Address, data: &[DataUnit]) {
        check_range(&self.name, self.size(), start, data.len());
        self.record(AccessKind::WriteBlock, start);
        let start = Self::index(start);
        self.words[start..start + data.len()].copy_from_slice(data);
    }

    fn size(&self) -> u64 {
        self.words.len() as u64
    }

    fn stats(&self) -> AccessStats {
        self.watcher.stats()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

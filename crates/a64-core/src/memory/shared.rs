use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AccessStats, Address, DataUnit, Memory};

/// Cloneable handle to a memory used by several upstream links.
///
/// Every clone forwards to the same memory under one lock, so each call is
/// atomic with respect to other units. A poisoned lock is recovered because
/// the guarded state is plain words and counters.
#[derive(Clone)]
pub struct SharedMemory {
    inner: Arc<Mutex<Box<dyn Memory>>>,
    name: Arc<str>,
    size: u64,
}

impl SharedMemory {
    /// Wraps `memory` for sharing.
    #[must_use]
    pub fn new(memory: Box<dyn Memory>) -> Self {
        let name = Arc::from(memory.name());
        let size = memory.size();
        Self {
            inner: Arc::new(Mutex::new(memory)),
            name,
            size,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Memory>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the shared memory.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn Memory) -> R) -> R {
        let mut guard = self.lock();
        f(guard.as_mut())
    }
}

impl Memory for SharedMemory {
    fn read(&mut self, addr: Address) -> DataUnit {
        self.lock().read(addr)
    }

    fn write(&mut self, addr: Address, value: DataUnit) {
        self.lock().write(addr, value);
    }

    fn read_block(&mut self, start: Address, count: usize) -> Vec<DataUnit> {
        self.lock().read_block(start, count)
    }

    fn write_block(&mut self, start: Address, data: &[DataUnit]) {
        self.lock().write_block(start, data);
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn stats(&self) -> AccessStats {
        self.lock().stats()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

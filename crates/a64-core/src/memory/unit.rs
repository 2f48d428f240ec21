//! Memory port owned by one processing unit: its L1 and its private stack.

use super::{
    Address, CacheMemory, DataMap, DataRegion, DataUnit, Memory, Ram, CACHE_LINE_SIZE,
    DATA_UNIT_BYTES,
};
use crate::api::DataBus;
use crate::fault::FaultCode;

/// L1 cache plus private stack behind a [`DataMap`].
pub struct UnitMemory {
    l1: CacheMemory,
    stack: Ram,
    map: DataMap,
}

impl UnitMemory {
    /// Combines an L1 and a private stack.
    #[must_use]
    pub fn new(l1: CacheMemory, stack: Ram) -> Self {
        let map = DataMap::new(stack.size(), l1.size());
        Self { l1, stack, map }
    }

    /// The unit's L1.
    #[must_use]
    pub const fn l1(&self) -> &CacheMemory {
        &self.l1
    }

    /// The unit's private stack.
    #[must_use]
    pub const fn stack(&self) -> &Ram {
        &self.stack
    }

    /// The unit's address map.
    #[must_use]
    pub const fn map(&self) -> DataMap {
        self.map
    }

    /// Writes `image` at word 0 of the hierarchy through L1, one line at a time.
    ///
    /// # Panics
    ///
    /// Panics when the image does not fit the hierarchy.
    pub fn load_image(&mut self, image: &[DataUnit]) {
        #[allow(clippy::cast_possible_truncation)]
        let line = CACHE_LINE_SIZE as usize;
        for (index, chunk) in image.chunks(line).enumerate() {
            self.l1.write_block((index * line) as Address, chunk);
        }
    }

    /// Zeroes the private stack before a program starts.
    pub fn reset_stack(&mut self) {
        let zeros = vec![0; self.stack.words().len()];
        self.stack.write_block(0, &zeros);
    }

    fn word_port(&mut self, region: DataRegion) -> &mut dyn Memory {
        match region {
            DataRegion::Stack => &mut self.stack,
            DataRegion::Hierarchy => &mut self.l1,
        }
    }
}

impl DataBus for UnitMemory {
    fn fetch(&mut self, pc: u64) -> Result<u32, FaultCode> {
        if pc % DATA_UNIT_BYTES != 0 {
            return Err(FaultCode::UnalignedAccess);
        }
        let word = pc / DATA_UNIT_BYTES;
        if word >= self.l1.size() {
            return Err(FaultCode::DataAbort);
        }
        Ok(self.l1.read(word))
    }

    fn load(&mut self, addr: u64, bytes: u64) -> Result<u64, FaultCode> {
        let target = self.map.resolve(addr, bytes)?;
        let port = self.word_port(target.region);
        let low = u64::from(port.read(target.word));
        if bytes <= DATA_UNIT_BYTES {
            return Ok(low);
        }
        let high = u64::from(port.read(target.word + 1));
        Ok(high << 32 | low)
    }

    fn probe_store(&self, addr: u64, bytes: u64) -> Result<(), FaultCode> {
        self.map.resolve(addr, bytes).map(|_| ())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn store(&mut self, addr: u64, bytes: u64, value: u64) {
        let Ok(target) = self.map.resolve(addr, bytes) else {
            panic!("store to {addr:#x} was not probed");
        };
        let port = self.word_port(target.region);
        port.write(target.word, value as DataUnit);
        if bytes > DATA_UNIT_BYTES {
            port.write(target.word + 1, (value >> 32) as DataUnit);
        }
    }
}

//! CPU: the root of the module, core and memory ownership tree.

use crate::api::{SharedSink, TraceEvent};
use crate::config::{CpuConfig, CpuConfigError};
use crate::diag::UnitDiagnostics;
use crate::memory::{
    AccessStats, CacheConfig, CacheMemory, Memory, Ram, SharedMemory, UnitMemory,
};
use crate::module::{Core, Module};
use crate::processing_unit::ProcessingUnit;
use crate::program::Program;
use crate::result::{ControlledResult, RunResult};
use crate::state::UnitStatus;

/// Multi-core CPU with a shared L3 and RAM.
///
/// Built bottom-up: RAM, L3, one L2 per module, then one L1, private stack
/// and processing unit per hardware thread. Every cache is direct-mapped
/// write-through.
pub struct Cpu {
    config: CpuConfig,
    ram: SharedMemory,
    l3: SharedMemory,
    modules: Vec<Module>,
}

impl Cpu {
    /// Builds the CPU described by `config`, starting one worker thread per
    /// hardware thread.
    ///
    /// # Errors
    ///
    /// Returns [`CpuConfigError`] when `config` fails validation or a cache
    /// level rejects its size. No worker is left running in that case.
    pub fn new(config: CpuConfig, sink: SharedSink) -> Result<Self, CpuConfigError> {
        config.validate()?;
        let cache_config = CacheConfig::default();

        let ram = SharedMemory::new(Box::new(Ram::new(
            "RAM",
            config.ram_size,
            SharedSink::clone(&sink),
        )));
        let l3 = SharedMemory::new(Box::new(CacheMemory::try_new(
            "L3",
            cache_config,
            Box::new(ram.clone()),
            config.l3_size,
            SharedSink::clone(&sink),
        )?));

        let threads = config.threads_per_core as usize;
        let mut modules = Vec::with_capacity(config.cores as usize);
        for module in 0..config.cores as usize {
            let l2 = SharedMemory::new(Box::new(CacheMemory::try_new(
                format!("L2[{module}]"),
                cache_config,
                Box::new(l3.clone()),
                config.l2_size,
                SharedSink::clone(&sink),
            )?));

            let mut cores = Vec::with_capacity(threads);
            for thread in 0..threads {
                let index = module * threads + thread;
                let l1 = CacheMemory::try_new(
                    format!("L1[{index}]"),
                    cache_config,
                    Box::new(l2.clone()),
                    config.l1_size,
                    SharedSink::clone(&sink),
                )?;
                let stack = Ram::new(
                    format!("STACK[{index}]"),
                    config.private_size(),
                    SharedSink::clone(&sink),
                );
                let unit = ProcessingUnit::new(
                    index,
                    UnitMemory::new(l1, stack),
                    SharedSink::clone(&sink),
                );
                cores.push(Core::new(unit));
            }
            modules.push(Module::new(module, l2, cores));
        }

        sink.on_event(TraceEvent::Construction {
            component: "CPU",
            detail: &format!(
                "{} cores x {} threads",
                config.cores, config.threads_per_core
            ),
        });
        Ok(Self {
            config,
            ram,
            l3,
            modules,
        })
    }

    /// Construction parameters.
    #[must_use]
    pub const fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Runs `program` to completion on the first hardware thread.
    #[must_use]
    pub fn run(&self, program: Program) -> RunResult {
        self.modules[0].run(program)
    }

    /// Queues `program` for stepping on the first hardware thread.
    #[must_use]
    pub fn step_in(&self, program: Program) -> ControlledResult {
        self.modules[0].step_in(program)
    }

    /// Stops every unit at its next instruction boundary and releases every
    /// stepping handle. Stopped units refuse further programs.
    pub fn stop(&self) {
        for module in &self.modules {
            module.stop();
        }
    }

    /// Configured core count (one module per core).
    #[must_use]
    pub const fn core_count(&self) -> u32 {
        self.config.cores
    }

    /// Hardware threads per core.
    #[must_use]
    pub const fn threads_per_core(&self) -> u32 {
        self.config.threads_per_core
    }

    /// Number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of processing units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.modules.iter().map(Module::core_count).sum()
    }

    /// Modules in index order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    fn core(&self, unit: usize) -> Option<&Core> {
        let threads = self.config.threads_per_core as usize;
        self.modules
            .get(unit / threads)
            .and_then(|module| module.cores().get(unit % threads))
    }

    /// Statistics of the L1 of `unit`.
    #[must_use]
    pub fn l1_stats(&self, unit: usize) -> Option<AccessStats> {
        self.core(unit).map(Core::l1_stats)
    }

    /// Statistics of the L2 of `module`.
    #[must_use]
    pub fn l2_stats(&self, module: usize) -> Option<AccessStats> {
        self.modules.get(module).map(Module::l2_stats)
    }

    /// Statistics of the shared L3.
    #[must_use]
    pub fn l3_stats(&self) -> AccessStats {
        self.l3.stats()
    }

    /// Statistics of RAM.
    #[must_use]
    pub fn ram_stats(&self) -> AccessStats {
        self.ram.stats()
    }

    /// Counters of `unit`.
    #[must_use]
    pub fn diagnostics(&self, unit: usize) -> Option<UnitDiagnostics> {
        self.core(unit).map(Core::diagnostics)
    }

    /// Status of `unit`.
    #[must_use]
    pub fn unit_status(&self, unit: usize) -> Option<UnitStatus> {
        self.core(unit).map(Core::status)
    }
}

impl Drop for Cpu {
    fn drop(&mut self) {
        self.stop();
    }
}

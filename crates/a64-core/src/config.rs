//! CPU construction parameters.

use thiserror::Error;

use crate::memory::CacheConfigError;

/// Configuration dimension named by [`CpuConfigError::ZeroDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Number of cores (modules with their own L2).
    Cores,
    /// Hardware threads per core.
    ThreadsPerCore,
    /// L1 size in units.
    L1Size,
    /// L2 size in units.
    L2Size,
    /// L3 size in units.
    L3Size,
    /// RAM size in units.
    RamSize,
    /// Per-thread stack size in units.
    StackSize,
}

impl Dimension {
    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cores => "core count",
            Self::ThreadsPerCore => "threads per core",
            Self::L1Size => "l1 size",
            Self::L2Size => "l2 size",
            Self::L3Size => "l3 size",
            Self::RamSize => "ram size",
            Self::StackSize => "stack size",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection reasons for a [`CpuConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuConfigError {
    /// A dimension that must be positive is zero.
    #[error("{0} must be positive")]
    ZeroDimension(Dimension),
    /// Per-thread process memory does not fit in RAM.
    #[error("process memory needs {needed} units but ram holds {ram}")]
    InsufficientRam {
        /// `(stack + heap) * threads` in units.
        needed: u64,
        /// Configured RAM size in units.
        ram: u64,
    },
    /// A cache level rejected its size or policy.
    #[error("cache construction failed: {0}")]
    Cache(#[from] CacheConfigError),
}

/// CPU shape and memory sizes, all sizes in 32-bit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CpuConfig {
    /// Cores, each with its own L2.
    pub cores: u32,
    /// Hardware threads per core, each with its own L1 and stack.
    pub threads_per_core: u32,
    /// Private L1 size.
    pub l1_size: u64,
    /// Per-core L2 size.
    pub l2_size: u64,
    /// Shared L3 size.
    pub l3_size: u64,
    /// RAM size.
    pub ram_size: u64,
    /// Per-thread stack size.
    pub stack_size: u64,
    /// Per-thread heap reservation; may be zero. The heap sits below the
    /// stack in the same private window.
    pub heap_size: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            cores: 2,
            threads_per_core: 1,
            l1_size: 256,
            l2_size: 1024,
            l3_size: 4096,
            ram_size: 16 * 1024,
            stack_size: 256,
            heap_size: 0,
        }
    }
}

impl CpuConfig {
    /// Sets the core count.
    #[must_use]
    pub const fn with_cores(mut self, cores: u32) -> Self {
        self.cores = cores;
        self
    }

    /// Sets the threads per core.
    #[must_use]
    pub const fn with_threads_per_core(mut self, threads: u32) -> Self {
        self.threads_per_core = threads;
        self
    }

    /// Sets the three cache sizes.
    #[must_use]
    pub const fn with_caches(mut self, l1: u64, l2: u64, l3: u64) -> Self {
        self.l1_size = l1;
        self.l2_size = l2;
        self.l3_size = l3;
        self
    }

    /// Sets the RAM size.
    #[must_use]
    pub const fn with_ram_size(mut self, units: u64) -> Self {
        self.ram_size = units;
        self
    }

    /// Sets the per-thread stack size.
    #[must_use]
    pub const fn with_stack_size(mut self, units: u64) -> Self {
        self.stack_size = units;
        self
    }

    /// Sets the per-thread heap reservation.
    #[must_use]
    pub const fn with_heap_size(mut self, units: u64) -> Self {
        self.heap_size = units;
        self
    }

    /// Words in each thread's private window: heap below, stack on top.
    #[must_use]
    pub const fn private_size(&self) -> u64 {
        self.stack_size.saturating_add(self.heap_size)
    }

    /// Total hardware threads.
    #[must_use]
    pub const fn unit_count(&self) -> u64 {
        self.cores as u64 * self.threads_per_core as u64
    }

    /// Checks every dimension and the RAM budget. Cache policy and size
    /// relations are checked when the caches are built.
    ///
    /// # Errors
    ///
    /// Returns [`CpuConfigError::ZeroDimension`] for the first zero dimension
    /// and [`CpuConfigError::InsufficientRam`] when process memory does not
    /// fit.
    pub fn validate(&self) -> Result<(), CpuConfigError> {
        let dimensions = [
            (Dimension::Cores, u64::from(self.cores)),
            (Dimension::ThreadsPerCore, u64::from(self.threads_per_core)),
            (Dimension::L1Size, self.l1_size),
            (Dimension::L2Size, self.l2_size),
            (Dimension::L3Size, self.l3_size),
            (Dimension::RamSize, self.ram_size),
            (Dimension::StackSize, self.stack_size),
        ];
        if let Some((dimension, _)) = dimensions.iter().find(|(_, value)| *value == 0) {
            return Err(CpuConfigError::ZeroDimension(*dimension));
        }

        let needed = self.private_size().saturating_mul(self.unit_count());
        if needed > self.ram_size {
            return Err(CpuConfigError::InsufficientRam {
                needed,
                ram: self.ram_size,
            });
        }
        Ok(())
    }
}

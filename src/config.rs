//! Configuration management for sort operations

use crate::error::{SortError, SortResult};

/// Keys per worker the string sort must exceed before it fans out.
pub const DEFAULT_PARALLEL_GRAIN: usize = 1000;

/// Ranges at or below this length are insertion sorted.
pub const DEFAULT_INSERTION_THRESHOLD: usize = 10;

const MAX_THREADS: usize = 1024;

/// Main configuration structure for sort operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Number of workers for the string fan-out (None = all CPUs)
    pub parallelism: Option<usize>,
    /// Fan-out needs each worker's share of keys to exceed this
    pub parallel_grain: usize,
    /// Insertion sort cut-off for quicksort ranges
    pub insertion_threshold: usize,
    /// Allow dispatch to fall back to the comparator sort
    pub use_fallback: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            parallel_grain: DEFAULT_PARALLEL_GRAIN,
            insertion_threshold: DEFAULT_INSERTION_THRESHOLD,
            use_fallback: true,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parallel threads
    pub fn with_parallelism(mut self, threads: Option<usize>) -> Self {
        self.parallelism = threads;
        self
    }

    pub fn with_parallel_grain(mut self, grain: usize) -> Self {
        self.parallel_grain = grain;
        self
    }

    pub fn with_insertion_threshold(mut self, threshold: usize) -> Self {
        self.insertion_threshold = threshold;
        self
    }

    /// Enable or disable the comparator fallback
    pub fn with_fallback(mut self, use_fallback: bool) -> Self {
        self.use_fallback = use_fallback;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if let Some(threads) = self.parallelism {
            if threads == 0 {
                return Err(SortError::thread_pool("thread count must be positive"));
            }
            if threads > MAX_THREADS {
                return Err(SortError::thread_pool("too many threads (maximum 1024)"));
            }
        }

        if self.parallel_grain == 0 {
            return Err(SortError::invalid_config("parallel grain must be positive"));
        }

        if self.insertion_threshold == 0 {
            return Err(SortError::invalid_config(
                "insertion threshold must be positive",
            ));
        }

        Ok(())
    }

    /// Get effective thread count
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(num_cpus::get)
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    pub fn parallelism(mut self, threads: usize) -> Self {
        self.config.parallelism = Some(threads);
        self
    }

    /// Run everything on the calling thread
    pub fn sequential(mut self) -> Self {
        self.config.parallelism = Some(1);
        self
    }

    pub fn parallel_grain(mut self, grain: usize) -> Self {
        self.config.parallel_grain = grain;
        self
    }

    pub fn insertion_threshold(mut self, threshold: usize) -> Self {
        self.config.insertion_threshold = threshold;
        self
    }

    /// Fail on mixed or unrecognized sequences instead of falling back
    pub fn strict(mut self) -> Self {
        self.config.use_fallback = false;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common use cases
pub mod presets {
    use super::*;

    /// Single-threaded configuration
    pub fn sequential() -> SortConfig {
        SortConfig::new().with_parallelism(Some(1))
    }

    /// Configuration that reports unsupported sequences as errors
    pub fn strict() -> SortConfig {
        SortConfig::new().with_fallback(false)
    }
}

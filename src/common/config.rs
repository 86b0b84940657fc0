//! Configuration for cachesim.
//!
//! Two layers: compile-time defaults (the constants below) and a TOML file
//! deserialized into [`Config`]. Every section of the file is optional and
//! falls back to the defaults.

use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};
use crate::workload::WorkloadKind;

// ============================================================================
// LFU with decay
// ============================================================================

/// Number of updates between two decay sweeps.
pub const DEFAULT_DECAY_INTERVAL: u64 = 10_000;

/// Multiplier applied to every tracked frequency on a sweep.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.5;

// ============================================================================
// TinyLFU + segmented LRU
// ============================================================================

/// Initial share of the cache given to the probation segment.
pub const DEFAULT_INIT_PROB_FRACTION: f64 = 0.2;

/// Length of the sliding frequency window, in accesses.
pub const DEFAULT_FREQ_WINDOW: usize = 10_000;

/// Cold-path accesses between two re-partition checks.
pub const DEFAULT_ADJUST_INTERVAL: u64 = 50_000;

/// Amount `prob_fraction` moves per adjustment.
pub const DEFAULT_ADJUST_STEP: f64 = 0.05;

/// Lower bound of `prob_fraction`.
pub const MIN_PROB_FRACTION: f64 = 0.05;

/// Upper bound of `prob_fraction`.
pub const MAX_PROB_FRACTION: f64 = 0.5;

/// Below this ghost-hit rate the probation segment shrinks.
pub const GHOST_HIT_RATE_THRESHOLD: f64 = 0.1;

/// Window frequency a block needs before it is admitted to probation.
pub const ADMISSION_THRESHOLD: u32 = 2;

// ============================================================================
// Simulation
// ============================================================================

/// Size of the block id space (ids run `1..=n_blocks`).
pub const DEFAULT_N_BLOCKS: u64 = 100;

/// Cache size used when none is configured.
pub const DEFAULT_CACHE_SIZE: usize = 16;

/// Accesses per generated workload.
pub const DEFAULT_WORKLOAD_LENGTH: usize = 100_000;

/// Seed for workload generation.
pub const DEFAULT_SEED: u64 = 42;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Simulation sweep configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// LFU-with-decay tuning.
    #[serde(default)]
    pub lfu_decay: LfuDecayConfig,

    /// TinyLFU + SLRU tuning.
    #[serde(default)]
    pub tiny_lfu: TinyLfuConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.lfu_decay.validate()?;
        self.tiny_lfu.validate()?;
        Ok(())
    }

    /// Policy tuning extracted for the policy factory.
    pub fn policy_settings(&self) -> PolicySettings {
        PolicySettings {
            lfu_decay: self.lfu_decay.clone(),
            tiny_lfu: self.tiny_lfu.clone(),
        }
    }
}

/// Tuning handed to [`PolicyKind::build`](crate::policy::PolicyKind::build).
#[derive(Debug, Clone, Default)]
pub struct PolicySettings {
    pub lfu_decay: LfuDecayConfig,
    pub tiny_lfu: TinyLfuConfig,
}

/// Simulation sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Cache sizes to test.
    #[serde(default = "SimulationConfig::default_cache_sizes")]
    pub cache_sizes: Vec<usize>,

    /// Workload distributions to test.
    #[serde(default = "SimulationConfig::default_workloads")]
    pub workloads: Vec<WorkloadKind>,

    /// Size of the block id space.
    #[serde(default = "SimulationConfig::default_n_blocks")]
    pub n_blocks: u64,

    /// Accesses per workload.
    #[serde(default = "SimulationConfig::default_length")]
    pub length: usize,

    /// Seed for workload generation.
    #[serde(default = "SimulationConfig::default_seed")]
    pub seed: u64,

    /// Issue a next-block prefetch after each access.
    #[serde(default = "SimulationConfig::default_prefetch")]
    pub prefetch: bool,

    /// Also run the mixed zipf/cyclic/uniform workload.
    #[serde(default = "SimulationConfig::default_mixed")]
    pub mixed: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cache_sizes: Self::default_cache_sizes(),
            workloads: Self::default_workloads(),
            n_blocks: Self::default_n_blocks(),
            length: Self::default_length(),
            seed: Self::default_seed(),
            prefetch: Self::default_prefetch(),
            mixed: Self::default_mixed(),
        }
    }
}

impl SimulationConfig {
    fn default_cache_sizes() -> Vec<usize> {
        vec![DEFAULT_CACHE_SIZE]
    }

    fn default_workloads() -> Vec<WorkloadKind> {
        vec![WorkloadKind::Uniform, WorkloadKind::Zipf, WorkloadKind::Cyclic]
    }

    fn default_n_blocks() -> u64 {
        DEFAULT_N_BLOCKS
    }

    fn default_length() -> usize {
        DEFAULT_WORKLOAD_LENGTH
    }

    fn default_seed() -> u64 {
        DEFAULT_SEED
    }

    fn default_prefetch() -> bool {
        true
    }

    fn default_mixed() -> bool {
        true
    }

    fn validate(&self) -> Result<()> {
        if self.cache_sizes.iter().any(|&size| size == 0) {
            return Err(Error::InvalidConfig("cache sizes must be > 0".into()));
        }
        if self.n_blocks == 0 {
            return Err(Error::InvalidConfig("n_blocks must be > 0".into()));
        }
        Ok(())
    }
}

/// LFU-with-decay tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct LfuDecayConfig {
    /// Updates between decay sweeps.
    #[serde(default = "LfuDecayConfig::default_decay_interval")]
    pub decay_interval: u64,

    /// Multiplier applied on each sweep, in `(0, 1]`.
    #[serde(default = "LfuDecayConfig::default_decay_factor")]
    pub decay_factor: f64,
}

impl Default for LfuDecayConfig {
    fn default() -> Self {
        Self {
            decay_interval: Self::default_decay_interval(),
            decay_factor: Self::default_decay_factor(),
        }
    }
}

impl LfuDecayConfig {
    fn default_decay_interval() -> u64 {
        DEFAULT_DECAY_INTERVAL
    }

    fn default_decay_factor() -> f64 {
        DEFAULT_DECAY_FACTOR
    }

    pub fn validate(&self) -> Result<()> {
        if self.decay_interval == 0 {
            return Err(Error::InvalidConfig("decay_interval must be > 0".into()));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "decay_factor must be in (0, 1], got {}",
                self.decay_factor
            )));
        }
        Ok(())
    }
}

/// TinyLFU + SLRU tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct TinyLfuConfig {
    /// Starting probation share, in `[0.05, 0.5]`.
    #[serde(default = "TinyLfuConfig::default_init_prob_fraction")]
    pub init_prob_fraction: f64,

    /// Sliding window length.
    #[serde(default = "TinyLfuConfig::default_freq_window")]
    pub freq_window: usize,

    /// Cold-path accesses between re-partition checks.
    #[serde(default = "TinyLfuConfig::default_adjust_interval")]
    pub adjust_interval: u64,

    /// Fraction change per adjustment.
    #[serde(default = "TinyLfuConfig::default_adjust_step")]
    pub adjust_step: f64,
}

impl Default for TinyLfuConfig {
    fn default() -> Self {
        Self {
            init_prob_fraction: Self::default_init_prob_fraction(),
            freq_window: Self::default_freq_window(),
            adjust_interval: Self::default_adjust_interval(),
            adjust_step: Self::default_adjust_step(),
        }
    }
}

impl TinyLfuConfig {
    fn default_init_prob_fraction() -> f64 {
        DEFAULT_INIT_PROB_FRACTION
    }

    fn default_freq_window() -> usize {
        DEFAULT_FREQ_WINDOW
    }

    fn default_adjust_interval() -> u64 {
        DEFAULT_ADJUST_INTERVAL
    }

    fn default_adjust_step() -> f64 {
        DEFAULT_ADJUST_STEP
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_PROB_FRACTION..=MAX_PROB_FRACTION).contains(&self.init_prob_fraction) {
            return Err(Error::InvalidConfig(format!(
                "init_prob_fraction must be in [{}, {}], got {}",
                MIN_PROB_FRACTION, MAX_PROB_FRACTION, self.init_prob_fraction
            )));
        }
        if self.freq_window == 0 {
            return Err(Error::InvalidConfig("freq_window must be > 0".into()));
        }
        if self.adjust_interval == 0 {
            return Err(Error::InvalidConfig("adjust_interval must be > 0".into()));
        }
        if !(self.adjust_step >= 0.0 && self.adjust_step.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "adjust_step must be a non-negative number, got {}",
                self.adjust_step
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Log format: "pretty", "json", or "compact".
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            format: Self::default_format(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }

    fn default_format() -> String {
        "pretty".to_string()
    }
}

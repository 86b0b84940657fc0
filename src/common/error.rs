//! Error types for cachesim.

use thiserror::Error;

use crate::common::BlockId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in cachesim.
///
/// Stale policy bookkeeping is not an error: policies fall back locally and
/// keep going. Only contract violations and bad input end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Workload distribution name is not one of the known kinds.
    #[error("Unknown workload type: {0}")]
    UnknownWorkloadType(String),

    /// Eviction policy name is not one of the known kinds.
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// `evict` was called with nothing to choose from.
    #[error("Cannot select a victim from an empty candidate set")]
    EmptyCandidateSet,

    /// A policy picked a victim that the cache does not hold.
    ///
    /// This indicates the policy's bookkeeping drifted past what its
    /// fallback can repair.
    #[error("Policy selected {0} which is not in the cache")]
    VictimNotCached(BlockId),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`Config`](crate::common::config::Config).
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

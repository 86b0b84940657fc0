//! Simulation harness.
//!
//! Replays a workload against a bounded cache and measures hit rate.
//!
//! # Components
//! - [`CacheSimulator`] - The simulated cache and its access loop
//! - [`SimStats`] - Hit/miss/eviction/prefetch counters
//! - [`run_policy`] / [`compare_policies`] - Timed runs per policy

mod runner;
mod simulator;
mod stats;

pub use runner::{compare_policies, run_policy, RunOptions, RunReport};
pub use simulator::CacheSimulator;
pub use stats::SimStats;

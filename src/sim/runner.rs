//! Timed policy runs over a prepared workload.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

use crate::common::config::PolicySettings;
use crate::common::{BlockId, Result};
use crate::policy::PolicyKind;
use crate::sim::{CacheSimulator, SimStats};

/// Outcome of one policy over one workload.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub capacity: usize,
    pub stats: SimStats,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:25} → Hit Rate: {:6.2}%, Time: {:.2}s",
            self.policy.label(),
            self.hit_rate() * 100.0,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Options shared by every run in a comparison.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub capacity: usize,
    pub n_blocks: u64,
    pub prefetch: bool,
    pub settings: PolicySettings,
}

/// Build a fresh `kind` policy and replay `workload` through it.
///
/// # Errors
/// - `Error::InvalidConfig` if the policy cannot be built for this capacity
/// - any error raised by the simulator during the run
pub fn run_policy(kind: PolicyKind, workload: &[BlockId], options: &RunOptions) -> Result<RunReport> {
    let policy = kind.build(options.capacity, &options.settings)?;
    let mut sim =
        CacheSimulator::new(options.capacity, policy, options.n_blocks).with_prefetch(options.prefetch);

    let start = Instant::now();
    sim.run(workload.iter().copied())?;
    let elapsed = start.elapsed();

    let report = RunReport {
        policy: kind,
        capacity: options.capacity,
        stats: sim.stats(),
        elapsed,
    };
    info!(
        policy = %kind,
        capacity = options.capacity,
        accesses = workload.len(),
        hit_rate = report.hit_rate(),
        elapsed_ms = elapsed.as_millis() as u64,
        "run complete"
    );
    Ok(report)
}

/// Run every [`PolicyKind`] over the same workload.
pub fn compare_policies(workload: &[BlockId], options: &RunOptions) -> Result<Vec<RunReport>> {
    PolicyKind::ALL
        .iter()
        .map(|&kind| run_policy(kind, workload, options))
        .collect()
}

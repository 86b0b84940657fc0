//! Simulation Integration Tests
//!
//! End-to-end runs: workload generation, every policy through the
//! simulator, and configuration loaded from disk.

use std::io::Write;

use cachesim::policy::PolicyKind;
use cachesim::sim::{compare_policies, run_policy, RunOptions};
use cachesim::workload::{generate_workload, mixed_workload};
use cachesim::{
    BlockId, CacheSimulator, Config, Error, EvictionPolicy, PolicySettings, WorkloadKind,
    WorkloadSpec,
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

const N_BLOCKS: u64 = 100;

fn options(capacity: usize, prefetch: bool) -> RunOptions {
    RunOptions {
        capacity,
        n_blocks: N_BLOCKS,
        prefetch,
        settings: PolicySettings::default(),
    }
}

// ============================================================================
// Capacity and accounting
// ============================================================================

#[test]
fn test_capacity_invariant_all_policies_all_workloads() {
    let settings = PolicySettings::default();

    for kind in WorkloadKind::ALL {
        let workload = generate_workload(kind, N_BLOCKS, 5_000, 7).unwrap();
        for policy_kind in PolicyKind::ALL {
            for capacity in [2, 16, 50] {
                let policy = policy_kind.build(capacity, &settings).unwrap();
                let mut sim = CacheSimulator::new(capacity, policy, N_BLOCKS);
                for &block in &workload {
                    sim.access(block).unwrap();
                    assert!(
                        sim.len() <= capacity,
                        "{} on {} exceeded capacity {}",
                        policy_kind,
                        kind,
                        capacity
                    );
                }
                assert_eq!(sim.stats().accesses(), workload.len() as u64);
            }
        }
    }
}

#[test]
fn test_compare_policies_reports_every_kind() {
    let workload = generate_workload(WorkloadKind::Zipf, N_BLOCKS, 20_000, 42).unwrap();
    let reports = compare_policies(&workload, &options(16, true)).unwrap();

    let kinds: Vec<_> = reports.iter().map(|r| r.policy).collect();
    assert_eq!(kinds, PolicyKind::ALL.to_vec());
    for report in &reports {
        assert_eq!(report.stats.accesses(), 20_000);
        assert!(report.hit_rate() > 0.0 && report.hit_rate() < 1.0);
    }
}

/// Prefetched blocks are loaded but never counted as hits or misses.
#[test]
fn test_prefetch_excluded_from_hit_rate() {
    let workload = generate_workload(WorkloadKind::Cyclic, N_BLOCKS, 2_000, 1).unwrap();

    let with = run_policy(PolicyKind::Lru, &workload, &options(16, true)).unwrap();
    let without = run_policy(PolicyKind::Lru, &workload, &options(16, false)).unwrap();

    assert_eq!(with.stats.accesses(), 2_000);
    assert_eq!(without.stats.accesses(), 2_000);
    assert!(with.stats.prefetches > 0);
    assert_eq!(without.stats.prefetches, 0);
}

/// A sequential scan is the best case for next-block prefetch.
#[test]
fn test_prefetch_turns_sequential_scan_into_hits() {
    let scan: Vec<BlockId> = (1..=N_BLOCKS).map(BlockId::new).collect();
    let report = run_policy(PolicyKind::Lru, &scan, &options(4, true)).unwrap();

    // Only the first access misses; each access prefetches its successor.
    assert_eq!(report.stats.misses, 1);
    assert_eq!(report.stats.hits, N_BLOCKS - 1);
}

#[test]
fn test_tiny_lfu_capacity_one_rejected() {
    let workload = generate_workload(WorkloadKind::Uniform, N_BLOCKS, 100, 1).unwrap();
    let result = run_policy(PolicyKind::TinyLfu, &workload, &options(1, true));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

// ============================================================================
// Workloads
// ============================================================================

#[test]
fn test_workloads_are_reproducible_and_in_range() {
    for kind in WorkloadKind::ALL {
        let a = WorkloadSpec::new(kind, N_BLOCKS, 1_000, 9).generate().unwrap();
        let b = WorkloadSpec::new(kind, N_BLOCKS, 1_000, 9).generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1_000);
        assert!(a.iter().all(|id| (1..=N_BLOCKS).contains(&id.0)));
    }
}

#[test]
fn test_unknown_workload_type() {
    let result = WorkloadSpec::from_name("gaussian", N_BLOCKS, 10, 0);
    assert!(matches!(result, Err(Error::UnknownWorkloadType(name)) if name == "gaussian"));
}

#[test]
fn test_mixed_workload_runs() {
    let workload = mixed_workload(0.01, 42).unwrap();
    assert_eq!(workload.len(), 10_000);

    let reports = compare_policies(&workload, &options(16, true)).unwrap();
    assert_eq!(reports.len(), 3);
}

// ============================================================================
// Configuration files
// ============================================================================

#[test]
fn test_config_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[simulation]
cache_sizes = [8, 32]
workloads = ["zipf", "phased"]
length = 5000

[tiny_lfu]
init_prob_fraction = 0.3
adjust_interval = 1000

[logging]
format = "compact"
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.simulation.cache_sizes, vec![8, 32]);
    assert_eq!(
        config.simulation.workloads,
        vec![WorkloadKind::Zipf, WorkloadKind::Phased]
    );
    assert_eq!(config.simulation.length, 5000);
    assert_eq!(config.tiny_lfu.init_prob_fraction, 0.3);
    assert_eq!(config.tiny_lfu.adjust_interval, 1000);
    assert_eq!(config.logging.format, "compact");

    let settings = config.policy_settings();
    let policy = PolicyKind::TinyLfu.build(8, &settings).unwrap();
    assert_eq!(policy.name(), "tiny-lfu");
}

#[test]
fn test_config_rejects_bad_values() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[lfu_decay]\ndecay_factor = 1.5").unwrap();

    let result = Config::load(file.path());
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_config_rejects_malformed_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[simulation\nlength = ").unwrap();

    let result = Config::load(file.path());
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn test_config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn prop_every_primary_access_is_hit_or_miss(
        blocks in prop::collection::vec(1u64..=40, 1..400),
        capacity in 2usize..12,
        prefetch in any::<bool>(),
        policy_idx in 0usize..3,
    ) {
        let kind = PolicyKind::ALL[policy_idx];
        let policy = kind.build(capacity, &PolicySettings::default()).unwrap();
        let mut sim = CacheSimulator::new(capacity, policy, 40).with_prefetch(prefetch);

        let mut hits = 0u64;
        for &id in &blocks {
            if sim.access(BlockId::new(id)).unwrap() {
                hits += 1;
            }
            prop_assert!(sim.len() <= capacity);
        }

        let stats = sim.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.hits + stats.misses, blocks.len() as u64);
        if !prefetch {
            prop_assert_eq!(stats.prefetches, 0);
        }
    }
}

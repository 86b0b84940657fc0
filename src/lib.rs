//! cachesim - A block cache simulator with interchangeable eviction policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            cachesim                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Workloads (workload/)                       │   │
//! │  │        uniform | zipf | cyclic | phased | mixed          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Simulation harness (sim/)                   │   │
//! │  │   CacheSimulator + next-block prefetch + SimStats        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       Eviction policies (policy/)  [Swappable]           │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │       LRU | LFU-Decay | TinyLFU + SLRU          │   │   │
//! │  │   │         (picked once per run by PolicyKind)      │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Data structures (ds/)                          │   │
//! │  │        SlotArena + IntrusiveList + LinkedSet             │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (BlockId, Error, config)
//! - [`policy`] - Eviction policy trait and implementations
//! - [`sim`] - Cache simulator and timed runs
//! - [`workload`] - Synthetic access sequences
//! - [`ds`] - Arena-backed ordered sets
//! - [`logging`] - tracing subscriber setup
//!
//! # Quick Start
//! ```
//! use cachesim::policy::PolicyKind;
//! use cachesim::workload::{generate_workload, WorkloadKind};
//! use cachesim::{CacheSimulator, PolicySettings};
//!
//! let workload = generate_workload(WorkloadKind::Zipf, 100, 10_000, 42).unwrap();
//! let policy = PolicyKind::TinyLfu.build(16, &PolicySettings::default()).unwrap();
//!
//! let mut sim = CacheSimulator::new(16, policy, 100);
//! sim.run(workload).unwrap();
//! assert!(sim.hit_rate() > 0.0);
//! ```

pub mod common;
pub mod ds;
pub mod logging;
pub mod policy;
pub mod sim;
pub mod workload;

// Re-export commonly used items at crate root for convenience
pub use common::config::{Config, PolicySettings};
pub use common::{BlockId, BlockSet, Error, Result};

pub use policy::{EvictionPolicy, PolicyKind};
pub use sim::{CacheSimulator, SimStats};
pub use workload::{WorkloadKind, WorkloadSpec};

//! Synthetic access sequences.
//!
//! Every generator is seeded, so the same [`WorkloadSpec`] always yields
//! the same sequence. Block ids run `1..=n_blocks`.
//!
//! | kind      | sequence                                                        |
//! |-----------|-----------------------------------------------------------------|
//! | `uniform` | independent uniform draws                                       |
//! | `zipf`    | Zeta(1.5) draws folded into the id space, heavily skewed to 1   |
//! | `cyclic`  | `1, 2, …, n_blocks, 1, 2, …`                                    |
//! | `phased`  | four equal phases, each uniform over its own quarter of the ids |

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zeta};
use serde::Deserialize;

use crate::common::{BlockId, Error, Result};

/// Zeta exponent for the `zipf` workload.
pub const ZIPF_EXPONENT: f64 = 1.5;

/// Number of phases in the `phased` workload.
pub const PHASES: u64 = 4;

/// A named access distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum WorkloadKind {
    Uniform,
    Zipf,
    Cyclic,
    Phased,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 4] = [
        WorkloadKind::Uniform,
        WorkloadKind::Zipf,
        WorkloadKind::Cyclic,
        WorkloadKind::Phased,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkloadKind::Uniform => "uniform",
            WorkloadKind::Zipf => "zipf",
            WorkloadKind::Cyclic => "cyclic",
            WorkloadKind::Phased => "phased",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkloadKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(WorkloadKind::Uniform),
            "zipf" => Ok(WorkloadKind::Zipf),
            "cyclic" => Ok(WorkloadKind::Cyclic),
            "phased" => Ok(WorkloadKind::Phased),
            _ => Err(Error::UnknownWorkloadType(s.to_string())),
        }
    }
}

impl TryFrom<String> for WorkloadKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Everything needed to reproduce a workload.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub kind: WorkloadKind,
    pub n_blocks: u64,
    pub length: usize,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn new(kind: WorkloadKind, n_blocks: u64, length: usize, seed: u64) -> Self {
        Self {
            kind,
            n_blocks,
            length,
            seed,
        }
    }

    /// Build from a distribution name.
    ///
    /// # Errors
    /// - `Error::UnknownWorkloadType` if `name` is not a known distribution
    pub fn from_name(name: &str, n_blocks: u64, length: usize, seed: u64) -> Result<Self> {
        Ok(Self::new(name.parse()?, n_blocks, length, seed))
    }

    /// Generate the full sequence.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `n_blocks` is 0, or below 4 for `phased`
    pub fn generate(&self) -> Result<Vec<BlockId>> {
        if self.n_blocks == 0 {
            return Err(Error::InvalidConfig("n_blocks must be > 0".into()));
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.kind {
            WorkloadKind::Uniform => Ok(uniform(&mut rng, 1, self.n_blocks, self.length)),
            WorkloadKind::Zipf => zipf(&mut rng, self.n_blocks, self.length),
            WorkloadKind::Cyclic => Ok(cyclic(self.n_blocks, self.length)),
            WorkloadKind::Phased => phased(&mut rng, self.n_blocks, self.length),
        }
    }
}

/// Generate `length` accesses of `kind` over `n_blocks` blocks.
pub fn generate_workload(
    kind: WorkloadKind,
    n_blocks: u64,
    length: usize,
    seed: u64,
) -> Result<Vec<BlockId>> {
    WorkloadSpec::new(kind, n_blocks, length, seed).generate()
}

/// Lengths of the three parts of [`mixed_workload`] at scale 1.0.
const MIXED_PARTS: [(WorkloadKind, u64, usize); 3] = [
    (WorkloadKind::Zipf, 80, 400_000),
    (WorkloadKind::Cyclic, 30, 300_000),
    (WorkloadKind::Uniform, 100, 300_000),
];

/// A skewed phase, then a tight loop, then noise.
///
/// Zipf over 80 blocks, cyclic over 30, uniform over 100, concatenated.
/// `scale` multiplies each part's length (1.0 gives one million accesses).
pub fn mixed_workload(scale: f64, seed: u64) -> Result<Vec<BlockId>> {
    let mut seq = Vec::new();
    for (i, &(kind, n_blocks, length)) in MIXED_PARTS.iter().enumerate() {
        let length = (length as f64 * scale.max(0.0)).round() as usize;
        let part = generate_workload(kind, n_blocks, length, seed.wrapping_add(i as u64))?;
        seq.extend(part);
    }
    Ok(seq)
}

fn uniform(rng: &mut StdRng, low: u64, high: u64, length: usize) -> Vec<BlockId> {
    (0..length)
        .map(|_| BlockId::new(rng.random_range(low..=high)))
        .collect()
}

fn zipf(rng: &mut StdRng, n_blocks: u64, length: usize) -> Result<Vec<BlockId>> {
    let zeta = Zeta::new(ZIPF_EXPONENT)
        .map_err(|e| Error::InvalidConfig(format!("zipf distribution: {}", e)))?;
    Ok((0..length)
        .map(|_| {
            let sample: f64 = zeta.sample(rng);
            BlockId::new(sample as u64 % n_blocks + 1)
        })
        .collect())
}

fn cyclic(n_blocks: u64, length: usize) -> Vec<BlockId> {
    (0..length as u64)
        .map(|i| BlockId::new(i % n_blocks + 1))
        .collect()
}

fn phased(rng: &mut StdRng, n_blocks: u64, length: usize) -> Result<Vec<BlockId>> {
    let span = n_blocks / PHASES;
    if span == 0 {
        return Err(Error::InvalidConfig(format!(
            "phased workload needs at least {} blocks, got {}",
            PHASES, n_blocks
        )));
    }

    let phase_len = length / PHASES as usize;
    let mut seq = Vec::with_capacity(length);
    for phase in 0..PHASES {
        let start = phase * span + 1;
        let end = (phase + 1) * span;
        seq.extend(uniform(rng, start, end, phase_len));
    }
    let rest = length - seq.len();
    seq.extend(uniform(rng, 1, n_blocks, rest));
    Ok(seq)
}

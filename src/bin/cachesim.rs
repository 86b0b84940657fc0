//! cachesim binary: compares eviction policies over synthetic workloads.

use std::path::PathBuf;

use cachesim::sim::{compare_policies, RunOptions};
use cachesim::workload::{mixed_workload, WorkloadSpec};
use cachesim::{Config, Result, WorkloadKind};
use clap::Parser;

/// Cache size used for the mixed workload.
const MIXED_CACHE_SIZE: usize = 16;

#[derive(Parser)]
#[command(name = "cachesim")]
#[command(about = "Compare cache eviction policies by hit rate")]
struct Args {
    /// Path to configuration file
    config: Option<PathBuf>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Run only this workload (uniform, zipf, cyclic, phased)
    #[arg(long)]
    workload: Option<String>,

    /// Accesses per workload
    #[arg(long)]
    length: Option<usize>,

    /// Seed for workload generation
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the next-block prefetch
    #[arg(long)]
    no_prefetch: bool,

    /// Skip the mixed workload
    #[arg(long)]
    no_mixed: bool,
}

fn main() {
    let args = Args::parse();

    if args.print_config {
        print_default_config();
        return;
    }

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    cachesim::logging::init(&config.logging);

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "simulation failed");
        std::process::exit(1);
    }
}

/// Load the config file (or defaults) and apply command-line overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let sim = &mut config.simulation;
    if let Some(name) = &args.workload {
        sim.workloads = vec![name.parse::<WorkloadKind>()?];
    }
    if let Some(length) = args.length {
        sim.length = length;
    }
    if let Some(seed) = args.seed {
        sim.seed = seed;
    }
    if args.no_prefetch {
        sim.prefetch = false;
    }
    if args.no_mixed {
        sim.mixed = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: &Config) -> Result<()> {
    let sim = &config.simulation;
    let settings = config.policy_settings();

    for &kind in &sim.workloads {
        let workload = WorkloadSpec::new(kind, sim.n_blocks, sim.length, sim.seed).generate()?;
        for &capacity in &sim.cache_sizes {
            println!("\n=== Testing k={} on {} distribution ===", capacity, kind);
            let options = RunOptions {
                capacity,
                n_blocks: sim.n_blocks,
                prefetch: sim.prefetch,
                settings: settings.clone(),
            };
            for report in compare_policies(&workload, &options)? {
                println!("  {}", report);
            }
        }
    }

    if sim.mixed {
        let scale = sim.length as f64 / 1_000_000.0;
        let workload = mixed_workload(scale.max(0.01), sim.seed)?;
        println!(
            "\n=== Testing k={} on mixed zipf/cyclic/uniform distribution ===",
            MIXED_CACHE_SIZE
        );
        let options = RunOptions {
            capacity: MIXED_CACHE_SIZE,
            n_blocks: sim.n_blocks,
            prefetch: sim.prefetch,
            settings,
        };
        for report in compare_policies(&workload, &options)? {
            println!("  {}", report);
        }
    }

    Ok(())
}

fn print_default_config() {
    let config = r#"# cachesim configuration

[simulation]
# Cache sizes (in blocks) to test
cache_sizes = [16]

# Workload distributions: uniform, zipf, cyclic, phased
workloads = ["uniform", "zipf", "cyclic"]

# Block ids run 1..=n_blocks
n_blocks = 100

# Accesses per workload
length = 100000

# Seed for workload generation
seed = 42

# Prefetch block (b mod n_blocks) + 1 after every access
prefetch = true

# Also run the mixed zipf/cyclic/uniform workload at cache size 16
mixed = true

[lfu_decay]
# Updates between decay sweeps
decay_interval = 10000

# Multiplier applied to every frequency on a sweep
decay_factor = 0.5

[tiny_lfu]
# Starting probation share of the cache, 0.05..=0.5
init_prob_fraction = 0.2

# Sliding frequency window length
freq_window = 10000

# Cold-path accesses between re-partition checks
adjust_interval = 50000

# Probation fraction change per adjustment
adjust_step = 0.05

[logging]
# Log level (RUST_LOG overrides)
level = "info"

# Log format: "pretty", "json", or "compact"
format = "pretty"
"#;
    print!("{}", config);
}

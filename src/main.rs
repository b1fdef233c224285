use clap::Parser;
use lanewise::{
    Result,
    benchmark::{self, BenchConfig, Kernel, Mode, Workload},
    fs::load_vectors_from_npy,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

/// Benchmark for the SIMD vector kernels
#[derive(Parser, Debug)]
#[command(name = "lanewise")]
#[command(about = "Benchmarks SIMD vector kernels against scalar baselines", long_about = None)]
struct Args {
    /// Kernel to run
    #[arg(short, long, value_enum, default_value_t = Kernel::Distance)]
    kernel: Kernel,

    /// Execution mode
    #[arg(short, long, value_enum, default_value_t = Mode::Simd)]
    mode: Mode,

    /// Logical vector length for generated vectors
    #[arg(short, long, default_value_t = 2048)]
    dim: usize,

    /// Number of generated vector pairs
    #[arg(short, long, default_value_t = 64)]
    pairs: usize,

    /// Passes over all the pairs
    #[arg(short, long, default_value_t = 1000)]
    iterations: usize,

    /// Worker threads for the threaded mode
    #[arg(short, long, default_value_t = 8)]
    threads: usize,

    /// Seed for generated vectors
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Path to a 2-D float32 numpy matrix; consecutive rows are paired
    #[arg(long)]
    vectors: Option<PathBuf>,
}

impl From<Args> for BenchConfig {
    fn from(args: Args) -> Self {
        BenchConfig {
            kernel: args.kernel,
            mode: args.mode,
            dim: args.dim,
            pairs: args.pairs,
            iterations: args.iterations,
            threads: args.threads,
            seed: args.seed,
            vectors: args.vectors,
        }
    }
}

fn run(config: BenchConfig) -> Result<()> {
    config.validate()?;

    let workload = match &config.vectors {
        Some(path) => {
            info!(?path, "loading vectors");
            Workload::from_loaded(load_vectors_from_npy(path)?)?
        }
        None => {
            info!(dim = config.dim, pairs = config.pairs, seed = config.seed, "generating vectors");
            Workload::generate(config.dim, config.pairs, config.seed)?
        }
    };

    let report = benchmark::run(&config, &workload)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BenchConfig::from(Args::parse());
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

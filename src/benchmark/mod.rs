//! Benchmark harness comparing the SIMD kernels against per-element baselines,
//! single threaded and spread over worker threads.

mod config;
mod runner;
pub mod scalar;
mod workload;

pub use config::{BenchConfig, Kernel, Mode};
pub use runner::{BenchReport, apply_simd, run};
pub use workload::Workload;

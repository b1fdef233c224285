use std::{
    hint::black_box,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Instant,
};

use serde::Serialize;
use tqdm::tqdm;
use tracing::{debug, info};

use crate::benchmark::{
    config::{BenchConfig, Kernel, Mode},
    scalar,
    workload::Workload,
};
use crate::error::Result;
use crate::numerics::{self, AlignedVector};
use crate::statistics::KernelStats;

const BATCH_SIZE: usize = 16;

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub config: BenchConfig,
    pub dim: usize,
    pub pairs: usize,
    pub stats: KernelStats,
    pub calls_per_sec: f64,
    /// Whether the kernel returns a scalar per pair, which is then what `checksum` adds up.
    /// For elementwise kernels each pair contributes the sum of its output vector instead.
    pub reduction: bool,
    /// Sum over all pairs of the per-pair result of the last iteration. Used to check modes
    /// against each other.
    pub checksum: f64,
}

/// Runs `config.iterations` passes of the configured kernel over every pair of `workload`.
pub fn run(config: &BenchConfig, workload: &Workload) -> Result<BenchReport> {
    config.validate()?;
    info!(
        kernel = ?config.kernel,
        mode = ?config.mode,
        dim = workload.dim(),
        pairs = workload.len(),
        iterations = config.iterations,
        "starting benchmark"
    );

    let (stats, checksum) = match config.mode {
        Mode::Simd => run_simd(config, workload)?,
        Mode::Scalar => run_scalar(config, workload),
        Mode::Threaded => run_threaded(config, workload),
    };

    info!(
        calls = stats.get_kernel_calls(),
        elapsed = ?stats.get_elapsed(),
        calls_per_sec = stats.calls_per_sec(),
        "benchmark done"
    );

    Ok(BenchReport {
        config: config.clone(),
        dim: workload.dim(),
        pairs: workload.len(),
        calls_per_sec: stats.calls_per_sec(),
        reduction: config.kernel.is_reduction(),
        stats,
        checksum,
    })
}

/// Applies one SIMD kernel to a pair. Elementwise kernels return the sum of the logical
/// part of `out`.
pub fn apply_simd(
    kernel: Kernel,
    n: usize,
    x: &AlignedVector,
    y: &AlignedVector,
    out: &mut AlignedVector,
) -> f32 {
    match kernel {
        Kernel::Add => numerics::add(n, x.blocks(), y.blocks(), out.blocks_mut()),
        Kernel::Sub => numerics::sub(n, x.blocks(), y.blocks(), out.blocks_mut()),
        Kernel::Mul => numerics::mul(n, x.blocks(), y.blocks(), out.blocks_mut()),
        Kernel::Dot => return numerics::dot(n, x.blocks(), y.blocks()),
        Kernel::Distance => return numerics::euclidean_distance(n, x.blocks(), y.blocks()),
    }
    out.as_slice()[..n].iter().sum()
}

fn run_simd(config: &BenchConfig, workload: &Workload) -> Result<(KernelStats, f64)> {
    let n = workload.dim();
    let mut out = AlignedVector::allocate(n)?;
    let mut stats = KernelStats::new();
    let mut last = vec![0.0f32; workload.len()];

    let start = Instant::now();
    for _ in tqdm(0..config.iterations).desc(Some("simd")) {
        for (slot, (x, y)) in last.iter_mut().zip(workload.pairs()) {
            *slot = black_box(apply_simd(config.kernel, n, x, y, &mut out));
            stats.bump_call(n);
        }
    }
    stats.add_elapsed(start.elapsed());

    Ok((stats, checksum(&last)))
}

fn run_scalar(config: &BenchConfig, workload: &Workload) -> (KernelStats, f64) {
    let n = workload.dim();
    let mut out = vec![0.0f32; n];
    let mut stats = KernelStats::new();
    let mut last = vec![0.0f32; workload.len()];

    let start = Instant::now();
    for _ in tqdm(0..config.iterations).desc(Some("scalar")) {
        for (slot, (x, y)) in last.iter_mut().zip(workload.pairs()) {
            *slot = black_box(scalar::apply(
                config.kernel,
                &x.as_slice()[..n],
                &y.as_slice()[..n],
                &mut out,
            ));
            stats.bump_call(n);
        }
    }
    stats.add_elapsed(start.elapsed());

    (stats, checksum(&last))
}

/// Worker threads grab batches of pairs from a shared cursor, each with its own output
/// buffer and counters. Results are written back by pair index so the checksum does not
/// depend on scheduling.
fn run_threaded(config: &BenchConfig, workload: &Workload) -> (KernelStats, f64) {
    let n = workload.dim();
    let num_pairs = workload.len();
    let mut combined_stats = KernelStats::new();
    let mut last = vec![0.0f32; num_pairs];

    let start = Instant::now();
    for iteration in tqdm(0..config.iterations).desc(Some("threaded")) {
        let next_batch = AtomicUsize::new(0);

        let per_thread: Vec<(Vec<(usize, f32)>, KernelStats)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..config.threads)
                .map(|_| {
                    let next_batch = &next_batch;
                    scope.spawn(move || {
                        let mut out = vec![0.0f32; n];
                        let mut local_results = Vec::new();
                        let mut local_stats = KernelStats::new();

                        loop {
                            let batch_start = next_batch.fetch_add(BATCH_SIZE, Ordering::Relaxed);
                            if batch_start >= num_pairs {
                                break;
                            }
                            let batch_end = std::cmp::min(batch_start + BATCH_SIZE, num_pairs);

                            for idx in batch_start..batch_end {
                                let (x, y) = &workload.pairs()[idx];
                                let res = black_box(scalar::apply(
                                    config.kernel,
                                    &x.as_slice()[..n],
                                    &y.as_slice()[..n],
                                    &mut out,
                                ));
                                local_results.push((idx, res));
                                local_stats.bump_call(n);
                            }
                        }

                        (local_results, local_stats)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().expect("Worker thread panicked"))
                .collect()
        });

        for (local_results, local_stats) in per_thread {
            for (idx, res) in local_results {
                last[idx] = res;
            }
            combined_stats = combined_stats.merge(&local_stats);
        }
        debug!(iteration, "threaded pass done");
    }
    combined_stats.add_elapsed(start.elapsed());

    (combined_stats, checksum(&last))
}

fn checksum(results: &[f32]) -> f64 {
    results.iter().map(|&r| r as f64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(kernel: Kernel, mode: Mode) -> BenchConfig {
        BenchConfig {
            kernel,
            mode,
            dim: 37,
            pairs: 20,
            iterations: 3,
            threads: 3,
            seed: 1,
            vectors: None,
        }
    }

    #[test]
    fn test_all_modes_agree_on_every_kernel() {
        let workload = Workload::generate(37, 20, 1).unwrap();
        for kernel in [Kernel::Add, Kernel::Sub, Kernel::Mul, Kernel::Dot, Kernel::Distance] {
            let simd = run(&small_config(kernel, Mode::Simd), &workload).unwrap();
            let scalar = run(&small_config(kernel, Mode::Scalar), &workload).unwrap();
            let threaded = run(&small_config(kernel, Mode::Threaded), &workload).unwrap();

            let tol = 1e-3 * (1.0 + simd.checksum.abs());
            assert!(
                (simd.checksum - scalar.checksum).abs() < tol,
                "{kernel:?}: simd={} scalar={}",
                simd.checksum,
                scalar.checksum
            );
            assert_eq!(scalar.checksum, threaded.checksum, "{kernel:?}");
        }
    }

    #[test]
    fn test_stats_count_every_call() {
        let workload = Workload::generate(37, 20, 1).unwrap();
        for mode in [Mode::Simd, Mode::Scalar, Mode::Threaded] {
            let report = run(&small_config(Kernel::Dot, mode), &workload).unwrap();
            assert_eq!(report.stats.get_kernel_calls(), 3 * 20, "{mode:?}");
            assert_eq!(report.stats.get_lanes_processed(), 3 * 20 * 5, "{mode:?}");
            assert_eq!(report.pairs, 20);
            assert_eq!(report.dim, 37);
        }
    }

    #[test]
    fn test_more_threads_than_batches() {
        let workload = Workload::generate(8, 2, 3).unwrap();
        let config = BenchConfig {
            threads: 8,
            ..small_config(Kernel::Distance, Mode::Threaded)
        };
        let report = run(&config, &workload).unwrap();
        assert_eq!(report.stats.get_kernel_calls(), 3 * 2);
    }

    #[test]
    fn test_apply_simd_sums_elementwise_output() {
        let x = AlignedVector::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        let y = AlignedVector::from_slice(&[1.0, 1.0, 1.0]).unwrap();
        let mut out = AlignedVector::allocate(3).unwrap();
        assert_eq!(apply_simd(Kernel::Add, 3, &x, &y, &mut out), 9.0);
        assert_eq!(out.as_slice()[..3], [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_report_marks_reductions() {
        let workload = Workload::generate(8, 2, 3).unwrap();
        for (kernel, reduction) in [(Kernel::Dot, true), (Kernel::Distance, true), (Kernel::Sub, false)] {
            let report = run(&small_config(kernel, Mode::Scalar), &workload).unwrap();
            assert_eq!(report.reduction, reduction, "{kernel:?}");
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let workload = Workload::generate(8, 2, 3).unwrap();
        let config = BenchConfig {
            iterations: 0,
            ..small_config(Kernel::Dot, Mode::Simd)
        };
        assert!(run(&config, &workload).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let workload = Workload::generate(8, 2, 3).unwrap();
        let report = run(&small_config(Kernel::Mul, Mode::Simd), &workload).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["config"]["kernel"], "mul");
        assert_eq!(json["reduction"], false);
        assert_eq!(json["stats"]["kernel_calls"], 6);
    }
}

use std::time::Duration;

use serde::Serialize;

use crate::numerics::lane_count;

/// Counters collected while running kernels. One instance per worker thread,
/// merged once the workers are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KernelStats {
    kernel_calls: usize,
    lanes_processed: usize,
    elapsed_nanos: u64,
}

impl KernelStats {
    pub fn new() -> Self {
        KernelStats {
            kernel_calls: 0,
            lanes_processed: 0,
            elapsed_nanos: 0,
        }
    }

    /// Record one kernel call over `n` logical elements. Lanes are counted after padding,
    /// which is the work the kernel actually does.
    pub fn bump_call(&mut self, n: usize) {
        self.kernel_calls += 1;
        self.lanes_processed += lane_count(n);
    }

    pub fn add_elapsed(&mut self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos = self.elapsed_nanos.saturating_add(nanos);
    }

    pub fn get_kernel_calls(&self) -> usize {
        self.kernel_calls
    }

    pub fn get_lanes_processed(&self) -> usize {
        self.lanes_processed
    }

    pub fn get_elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }

    /// Kernel calls per second of recorded time, 0 when nothing was timed.
    pub fn calls_per_sec(&self) -> f64 {
        let secs = self.get_elapsed().as_secs_f64();
        if secs > 0.0 {
            self.kernel_calls as f64 / secs
        } else {
            0.0
        }
    }

    pub fn merge(&self, other: &KernelStats) -> KernelStats {
        KernelStats {
            kernel_calls: self.kernel_calls + other.kernel_calls,
            lanes_processed: self.lanes_processed + other.lanes_processed,
            elapsed_nanos: self.elapsed_nanos.max(other.elapsed_nanos),
        }
    }
}

impl Default for KernelStats {
    fn default() -> Self {
        KernelStats::new()
    }
}

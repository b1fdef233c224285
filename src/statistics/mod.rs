//! Counters for kernel benchmark runs: number of calls, lanes processed and wall time,
//! mergeable across worker threads.

mod stats;
pub use stats::*;

//! Numerical operations and SIMD-optimized data structures for vector computations.
//!
//! Vectors live in 32-byte aligned blocks of 8 f32 values, zero-padded past their logical
//! length, and the kernels walk them one block (one 256-bit register) at a time.

mod aligned_block;
mod aligned_vector;
mod f32slice;
pub mod kernels;

pub use aligned_block::{AlignedBlock, SIMD_LANECOUNT, checked_padded_len, lane_count, padded_len};
pub use aligned_vector::AlignedVector;
pub use f32slice::VectorLike;
pub use kernels::{add, dot, euclidean_distance, l2_squared, mul, sub};

//! The five lane-chunked kernels.
//!
//! Every kernel takes the logical element count `n`, rounds it up once with
//! [`lane_count`], and processes that many whole lane chunks. Operand views shorter than
//! `lane_count(n)` chunks make the kernel panic. Lanes past `n` are processed like any other:
//! elementwise kernels write the result of the padding there, reductions rely on the padding
//! being zero.

use std::simd::Simd;

use crate::numerics::aligned_block::{AlignedBlock, SIMD_LANECOUNT, lane_count};

type SimdF32 = Simd<f32, SIMD_LANECOUNT>;

#[inline(always)]
fn load(block: &AlignedBlock) -> SimdF32 {
    SimdF32::from_array(block.data)
}

#[inline(always)]
fn elementwise<F>(n: usize, x: &[AlignedBlock], y: &[AlignedBlock], z: &mut [AlignedBlock], op: F)
where
    F: Fn(SimdF32, SimdF32) -> SimdF32,
{
    let lanes = lane_count(n);
    let (x, y, z) = (&x[..lanes], &y[..lanes], &mut z[..lanes]);

    for ((out, a), b) in z.iter_mut().zip(x).zip(y) {
        out.data = op(load(a), load(b)).to_array();
    }
}

/// `z[i] = x[i] + y[i]`
#[inline]
pub fn add(n: usize, x: &[AlignedBlock], y: &[AlignedBlock], z: &mut [AlignedBlock]) {
    elementwise(n, x, y, z, |a, b| a + b)
}

/// `z[i] = x[i] - y[i]`
#[inline]
pub fn sub(n: usize, x: &[AlignedBlock], y: &[AlignedBlock], z: &mut [AlignedBlock]) {
    elementwise(n, x, y, z, |a, b| a - b)
}

/// `z[i] = x[i] * y[i]`
#[inline]
pub fn mul(n: usize, x: &[AlignedBlock], y: &[AlignedBlock], z: &mut [AlignedBlock]) {
    elementwise(n, x, y, z, |a, b| a * b)
}

/// Sums the lanes of an accumulator one after the other, lane 0 first.
///
/// `reduce_sum` leaves the association order to the backend; this one is fixed so results are
/// reproducible bit for bit across targets.
#[inline(always)]
pub fn horizontal_sum(acc: SimdF32) -> f32 {
    let t = acc.to_array();
    t[0] + t[1] + t[2] + t[3] + t[4] + t[5] + t[6] + t[7]
}

/// `Σ x[i] * y[i]`
#[inline]
pub fn dot(n: usize, x: &[AlignedBlock], y: &[AlignedBlock]) -> f32 {
    let lanes = lane_count(n);
    let mut intermediate_sum_lanes = SimdF32::splat(0.0);

    for (a, b) in x[..lanes].iter().zip(&y[..lanes]) {
        intermediate_sum_lanes += load(a) * load(b);
    }

    horizontal_sum(intermediate_sum_lanes)
}

/// Computes the **SQUARED** L2 distance `Σ (x[i] - y[i]) ** 2`.
///
/// Enough when only comparing distances, since the square root is monotonic.
#[inline]
pub fn l2_squared(n: usize, x: &[AlignedBlock], y: &[AlignedBlock]) -> f32 {
    let lanes = lane_count(n);
    let mut intermediate_sum_lanes = SimdF32::splat(0.0);

    for (a, b) in x[..lanes].iter().zip(&y[..lanes]) {
        let diff = load(a) - load(b);
        intermediate_sum_lanes += diff * diff;
    }

    horizontal_sum(intermediate_sum_lanes)
}

/// `sqrt(Σ (x[i] - y[i]) ** 2)`
#[inline]
pub fn euclidean_distance(n: usize, x: &[AlignedBlock], y: &[AlignedBlock]) -> f32 {
    l2_squared(n, x, y).sqrt()
}

//! Per-element loops used as the baseline the SIMD kernels are measured against.

use crate::benchmark::config::Kernel;

/// Runs `kernel` element by element on the logical parts of `x` and `y`.
/// Elementwise kernels write into `out` and return the sum of what they wrote.
pub fn apply(kernel: Kernel, x: &[f32], y: &[f32], out: &mut [f32]) -> f32 {
    match kernel {
        Kernel::Add => elementwise(x, y, out, |a, b| a + b),
        Kernel::Sub => elementwise(x, y, out, |a, b| a - b),
        Kernel::Mul => elementwise(x, y, out, |a, b| a * b),
        Kernel::Dot => dot(x, y),
        Kernel::Distance => euclidean_distance(x, y),
    }
}

fn elementwise(x: &[f32], y: &[f32], out: &mut [f32], op: impl Fn(f32, f32) -> f32) -> f32 {
    for ((o, &a), &b) in out.iter_mut().zip(x).zip(y) {
        *o = op(a, b);
    }
    out.iter().sum()
}

pub fn dot(x: &[f32], y: &[f32]) -> f32 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

pub fn euclidean_distance(x: &[f32], y: &[f32]) -> f32 {
    x.iter()
        .zip(y)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

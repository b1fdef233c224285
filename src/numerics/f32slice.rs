use crate::numerics::{
    aligned_block::{AlignedBlock, SIMD_LANECOUNT},
    kernels,
};

/// Whole-vector operations on lane chunk views. The trait only has one implementation, and
/// exists because inherent impl blocks cannot be added to `[AlignedBlock]`.
///
/// # Contract
///
/// - Operations involving two vectors require that they have the same number of chunks.
/// - The padding of both vectors is zero, otherwise reductions pick it up.
pub trait VectorLike {
    fn l2_squared(&self, othr: &Self) -> f32;
    fn l2(&self, othr: &Self) -> f32;
    fn dot(&self, othr: &Self) -> f32;
    fn add_into(&self, othr: &Self, out: &mut Self);
    fn sub_into(&self, othr: &Self, out: &mut Self);
    fn mul_into(&self, othr: &Self, out: &mut Self);
}

impl VectorLike for [AlignedBlock] {
    /// Computes the **SQUARED** L2 distance between two vectors.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths
    #[inline]
    fn l2_squared(&self, othr: &[AlignedBlock]) -> f32 {
        assert_eq!(self.len(), othr.len());
        kernels::l2_squared(self.len() * SIMD_LANECOUNT, self, othr)
    }

    #[inline]
    fn l2(&self, othr: &[AlignedBlock]) -> f32 {
        self.l2_squared(othr).sqrt()
    }

    #[inline]
    fn dot(&self, othr: &[AlignedBlock]) -> f32 {
        assert_eq!(self.len(), othr.len());
        kernels::dot(self.len() * SIMD_LANECOUNT, self, othr)
    }

    #[inline]
    fn add_into(&self, othr: &[AlignedBlock], out: &mut [AlignedBlock]) {
        assert_eq!(self.len(), othr.len());
        assert_eq!(self.len(), out.len());
        kernels::add(self.len() * SIMD_LANECOUNT, self, othr, out)
    }

    #[inline]
    fn sub_into(&self, othr: &[AlignedBlock], out: &mut [AlignedBlock]) {
        assert_eq!(self.len(), othr.len());
        assert_eq!(self.len(), out.len());
        kernels::sub(self.len() * SIMD_LANECOUNT, self, othr, out)
    }

    #[inline]
    fn mul_into(&self, othr: &[AlignedBlock], out: &mut [AlignedBlock]) {
        assert_eq!(self.len(), othr.len());
        assert_eq!(self.len(), out.len());
        kernels::mul(self.len() * SIMD_LANECOUNT, self, othr, out)
    }
}

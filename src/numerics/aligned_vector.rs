use std::slice;

use crate::error::{LanewiseError, Result};
use crate::numerics::aligned_block::{AlignedBlock, SIMD_LANECOUNT, checked_padded_len, lane_count};

/// An owned `f32` buffer whose address is 32-byte aligned and whose length is rounded up
/// to a multiple of [`SIMD_LANECOUNT`].
///
/// The storage is a boxed slice of [`AlignedBlock`], so the allocator sees the block's alignment
/// and the memory is released when the vector goes out of scope. Elements past the logical length
/// given to [`AlignedVector::allocate`] are zero and stay zero unless the caller writes them.
///
/// The vector does not remember the logical length: callers that need it keep track of it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedVector {
    blocks: Box<[AlignedBlock]>,
}

impl AlignedVector {
    /// Allocates room for `n` logical elements, padded up to the next lane boundary.
    /// Every element starts at `0.0`.
    ///
    /// # Errors
    ///
    /// [`LanewiseError::Allocation`] if the allocator cannot satisfy the request.
    pub fn allocate(n: usize) -> Result<Self> {
        let lanes = lane_count(n);
        let mut blocks = Vec::new();
        let reserved = match checked_padded_len(n) {
            Some(_) => blocks.try_reserve_exact(lanes).is_ok(),
            None => false,
        };
        if !reserved {
            let elements = checked_padded_len(n).unwrap_or(usize::MAX);
            tracing::error!(requested = n, elements, "aligned allocation failed");
            return Err(LanewiseError::Allocation { elements });
        }
        blocks.resize(lanes, AlignedBlock::ZERO);

        Ok(AlignedVector {
            blocks: blocks.into_boxed_slice(),
        })
    }

    /// Allocates a vector for `values.len()` elements and copies `values` into its head.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        let mut vector = Self::allocate(values.len())?;
        vector.as_mut_slice()[..values.len()].copy_from_slice(values);
        Ok(vector)
    }

    /// Releases the buffer. Equivalent to dropping the handle.
    pub fn free(self) {
        drop(self)
    }

    /// Padded length, always a multiple of [`SIMD_LANECOUNT`].
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len() * SIMD_LANECOUNT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Lane chunk view, the input format of every kernel.
    #[inline]
    pub fn blocks(&self) -> &[AlignedBlock] {
        &self.blocks
    }

    #[inline]
    pub fn blocks_mut(&mut self) -> &mut [AlignedBlock] {
        &mut self.blocks
    }

    /// Flat view over the whole padded buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: AlignedBlock is repr(C) around [f32; SIMD_LANECOUNT] with no padding (size is
        // checked in aligned_block's tests), so `blocks.len()` blocks are exactly `len()` f32s.
        unsafe { slice::from_raw_parts(self.blocks.as_ptr().cast::<f32>(), self.len()) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        let len = self.len();
        // SAFETY: see `as_slice`; the exclusive borrow of self covers the whole buffer.
        unsafe { slice::from_raw_parts_mut(self.blocks.as_mut_ptr().cast::<f32>(), len) }
    }
}

impl AsRef<[f32]> for AlignedVector {
    fn as_ref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl AsMut<[f32]> for AlignedVector {
    fn as_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

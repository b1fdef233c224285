pub const SIMD_LANECOUNT: usize = 8;

/// One SIMD lane chunk: eight consecutive `f32`, aligned on the width of a 256-bit register.
///
/// `repr(C)` pins the field at offset 0 and, together with the alignment, guarantees there is
/// no padding: a `[AlignedBlock]` has exactly the memory layout of a `[f32]` whose length is a
/// multiple of [`SIMD_LANECOUNT`] and whose address is a multiple of 32.
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedBlock {
    pub data: [f32; SIMD_LANECOUNT],
}

/// Number of lane chunks needed to hold `n` logical elements. Defined for every `n`.
#[inline]
pub const fn lane_count(n: usize) -> usize {
    n.div_ceil(SIMD_LANECOUNT)
}

/// Rounds a logical element count up to the next multiple of [`SIMD_LANECOUNT`],
/// or `None` when that multiple does not fit in a `usize`.
#[inline]
pub const fn checked_padded_len(n: usize) -> Option<usize> {
    lane_count(n).checked_mul(SIMD_LANECOUNT)
}

/// Rounds a logical element count up to the next multiple of [`SIMD_LANECOUNT`].
///
/// # Panics
///
/// Panics if `n > usize::MAX - SIMD_LANECOUNT + 1`, see [`checked_padded_len`].
#[inline]
pub const fn padded_len(n: usize) -> usize {
    match checked_padded_len(n) {
        Some(padded) => padded,
        None => panic!("padded length overflows usize"),
    }
}

impl AlignedBlock {
    pub const ZERO: AlignedBlock = AlignedBlock {
        data: [0.0; SIMD_LANECOUNT],
    };

    pub fn new(data: [f32; SIMD_LANECOUNT]) -> Self {
        AlignedBlock { data }
    }

    /// Packs `data` into lane chunks. A trailing partial chunk is zero-padded; a length that is
    /// already a multiple of the lane count produces no extra chunk.
    pub fn allocate_padded(data: &[f32]) -> Vec<AlignedBlock> {
        let mut returned = Vec::with_capacity(lane_count(data.len()));

        let (chunked, remainder) = data.as_chunks::<SIMD_LANECOUNT>();
        for &chunk in chunked.iter() {
            returned.push(Self::new(chunk));
        }

        if !remainder.is_empty() {
            let mut remainder_data = [0.0; SIMD_LANECOUNT];
            remainder_data[..remainder.len()].copy_from_slice(remainder);
            returned.push(Self::new(remainder_data));
        }
        returned
    }
}

impl Default for AlignedBlock {
    fn default() -> Self {
        AlignedBlock::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignedblock_is_aligned_on_simd() {
        assert_eq!(
            align_of::<AlignedBlock>(),
            size_of::<f32>() * SIMD_LANECOUNT
        );
        assert_eq!(size_of::<AlignedBlock>(), size_of::<f32>() * SIMD_LANECOUNT);
        // repr(align(XX)) only takes an integer literal, so if the lanecount ever changes,
        // the alignment at the top of this file has to follow by hand (4 bytes per f32).
    }

    #[test]
    fn test_padded_len_boundaries() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 8);
        assert_eq!(padded_len(7), 8);
        assert_eq!(padded_len(8), 8);
        assert_eq!(padded_len(9), 16);
        assert_eq!(padded_len(15), 16);
        assert_eq!(padded_len(16), 16);
    }

    #[test]
    fn test_rounding_at_top_of_usize() {
        assert_eq!(lane_count(usize::MAX), usize::MAX / SIMD_LANECOUNT + 1);
        assert_eq!(checked_padded_len(usize::MAX), None);
        assert_eq!(checked_padded_len(usize::MAX - 6), None);
        assert_eq!(checked_padded_len(usize::MAX - 7), Some(usize::MAX - 7));
        assert_eq!(checked_padded_len(usize::MAX - 8), Some(usize::MAX - 7));
    }

    #[test]
    #[should_panic]
    fn test_padded_len_overflow_panics() {
        padded_len(usize::MAX);
    }

    #[test]
    fn test_lane_count() {
        assert_eq!(lane_count(0), 0);
        assert_eq!(lane_count(7), 1);
        assert_eq!(lane_count(9), 2);
        assert_eq!(lane_count(2048), 256);
    }

    #[test]
    fn test_allocate_padded() {
        // exact multiple of SIMD_LANECOUNT
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let blocks = AlignedBlock::allocate_padded(&data);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        // with remainder
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let blocks = AlignedBlock::allocate_padded(&data);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].data[0..2], [9.0, 10.0]);
        assert_eq!(blocks[1].data[2..], [0.0; 6]);

        assert!(AlignedBlock::allocate_padded(&[]).is_empty());
    }

    #[test]
    fn test_allocated_blocks_are_aligned() {
        let blocks = AlignedBlock::allocate_padded(&[1.0; 21]);
        for block in &blocks {
            assert_eq!((block as *const AlignedBlock as usize) % 32, 0);
        }
    }
}

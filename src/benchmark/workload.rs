use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use crate::error::{LanewiseError, Result};
use crate::fs::LoadedVectors;
use crate::numerics::AlignedVector;

/// The vector pairs a benchmark run iterates over, all with the same logical length.
pub struct Workload {
    dim: usize,
    pairs: Vec<(AlignedVector, AlignedVector)>,
}

impl Workload {
    /// `num_pairs` pairs of standard normal vectors. Deterministic for a given seed.
    pub fn generate(dim: usize, num_pairs: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pairs = Vec::with_capacity(num_pairs);
        for _ in 0..num_pairs {
            let x = Self::random_vector(dim, &mut rng)?;
            let y = Self::random_vector(dim, &mut rng)?;
            pairs.push((x, y));
        }
        Ok(Workload { dim, pairs })
    }

    fn random_vector<R: Rng>(dim: usize, rng: &mut R) -> Result<AlignedVector> {
        let mut vector = AlignedVector::allocate(dim)?;
        for entry in vector.as_mut_slice()[..dim].iter_mut() {
            *entry = rng.sample(StandardNormal);
        }
        Ok(vector)
    }

    /// Pairs up consecutive rows (0 with 1, 2 with 3, ...). An odd last row is dropped.
    pub fn from_loaded(loaded: LoadedVectors) -> Result<Self> {
        if loaded.rows.len() < 2 {
            return Err(LanewiseError::Config(format!(
                "need at least 2 vectors to form a pair, found {}",
                loaded.rows.len()
            )));
        }
        if loaded.rows.len() % 2 == 1 {
            tracing::warn!(rows = loaded.rows.len(), "odd number of vectors, dropping the last one");
        }

        let mut rows = loaded.rows.into_iter();
        let mut pairs = Vec::new();
        while let (Some(x), Some(y)) = (rows.next(), rows.next()) {
            pairs.push((x, y));
        }
        Ok(Workload {
            dim: loaded.dim,
            pairs,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn pairs(&self) -> &[(AlignedVector, AlignedVector)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

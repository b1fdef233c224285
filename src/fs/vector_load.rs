use std::path::Path;

use crate::error::{LanewiseError, Result};
use crate::numerics::{AlignedVector, checked_padded_len};

/// Vectors read from a 2-D `.npy` matrix, one [`AlignedVector`] per row.
pub struct LoadedVectors {
    /// Logical row width, before padding.
    pub dim: usize,
    pub rows: Vec<AlignedVector>,
}

/// Loads a `(rows, dim)` float32 `.npy` matrix. Rows are padded to the next lane boundary,
/// so `dim` does not have to be a multiple of the lane count.
pub fn load_vectors_from_npy(path: impl AsRef<Path>) -> Result<LoadedVectors> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LanewiseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let npy = npyz::NpyFile::new(&bytes[..]).map_err(|e| LanewiseError::Npy(e.to_string()))?;

    let shape = npy.shape().to_vec();
    if shape.len() != 2 {
        return Err(LanewiseError::Shape {
            expected: 2,
            found: shape,
        });
    }
    let (d1, d2) = (to_usize(shape[0])?, to_usize(shape[1])?);

    // The header is untrusted: never size anything from it before checking the payload holds it.
    let declared_bytes = d1
        .checked_mul(d2)
        .and_then(|elements| elements.checked_mul(size_of::<f32>()));
    match declared_bytes {
        Some(declared) if declared <= bytes.len() => {}
        _ => {
            return Err(LanewiseError::Npy(format!(
                "header declares shape ({d1}, {d2}) but the file only holds {} bytes",
                bytes.len()
            )));
        }
    }
    tracing::debug!(rows = d1, dim = d2, padded = ?checked_padded_len(d2), ?path, "loading vectors");

    let mut iter = npy
        .data::<f32>()
        .map_err(|e| LanewiseError::Npy(e.to_string()))?;
    let mut rows = Vec::new();
    for _ in 0..d1 {
        let mut row = AlignedVector::allocate(d2)?;
        for entry in row.as_mut_slice()[..d2].iter_mut() {
            *entry = iter
                .next()
                .ok_or_else(|| LanewiseError::Npy("array data ended early".to_string()))?
                .map_err(|e| LanewiseError::Npy(e.to_string()))?;
        }
        rows.push(row);
    }

    Ok(LoadedVectors { dim: d2, rows })
}

fn to_usize(dim: u64) -> Result<usize> {
    usize::try_from(dim).map_err(|_| LanewiseError::Npy(format!("dimension {dim} does not fit in usize")))
}

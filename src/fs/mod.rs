//! File system I/O for loading vectors from disk.
//!
//! Vectors are read from NumPy `.npy` matrices, one aligned and padded vector per row.

mod vector_load;

pub use vector_load::*;

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{LanewiseError, Result};

/// Which kernel a benchmark run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Add,
    Sub,
    Mul,
    Dot,
    Distance,
}

impl Kernel {
    /// Reductions return a scalar, the other kernels fill an output vector.
    pub fn is_reduction(self) -> bool {
        matches!(self, Kernel::Dot | Kernel::Distance)
    }
}

/// How the kernel is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Lane-chunked SIMD kernels on aligned vectors.
    Simd,
    /// Plain per-element loops, single thread.
    Scalar,
    /// Plain per-element loops spread over worker threads, one vector pair at a time.
    Threaded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub kernel: Kernel,
    pub mode: Mode,
    /// Logical vector length. Ignored when `vectors` is set, the file decides.
    pub dim: usize,
    /// Number of (x, y) vector pairs generated when no file is given.
    pub pairs: usize,
    pub iterations: usize,
    /// Worker threads for [`Mode::Threaded`].
    pub threads: usize,
    pub seed: u64,
    /// Optional `.npy` matrix; consecutive rows are paired up.
    pub vectors: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            kernel: Kernel::Distance,
            mode: Mode::Simd,
            dim: 2048,
            pairs: 64,
            iterations: 1000,
            threads: 8,
            seed: 42,
            vectors: None,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vectors.is_none() && self.dim == 0 {
            return Err(LanewiseError::Config("dim must be positive".to_string()));
        }
        if self.vectors.is_none() && self.pairs == 0 {
            return Err(LanewiseError::Config("pairs must be positive".to_string()));
        }
        if self.iterations == 0 {
            return Err(LanewiseError::Config(
                "iterations must be positive".to_string(),
            ));
        }
        if self.mode == Mode::Threaded && self.threads == 0 {
            return Err(LanewiseError::Config(
                "threaded mode needs at least one thread".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = BenchConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LanewiseError::Config(_))));
    }

    #[test]
    fn test_zero_threads_only_matters_when_threaded() {
        let config = BenchConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = BenchConfig {
            threads: 0,
            mode: Mode::Threaded,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dim_allowed_with_file() {
        let config = BenchConfig {
            dim: 0,
            vectors: Some(PathBuf::from("vectors.npy")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kernel_names_in_json() {
        let json = serde_json::to_string(&Kernel::Distance).unwrap();
        assert_eq!(json, "\"distance\"");
        let mode: Mode = serde_json::from_str("\"threaded\"").unwrap();
        assert_eq!(mode, Mode::Threaded);
    }

    #[test]
    fn test_reduction_kernels() {
        assert!(Kernel::Dot.is_reduction());
        assert!(Kernel::Distance.is_reduction());
        assert!(!Kernel::Add.is_reduction());
        assert!(!Kernel::Mul.is_reduction());
    }
}

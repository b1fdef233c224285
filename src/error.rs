//! Error types shared by the allocator, the vector loaders and the benchmark harness.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanewiseError {
    #[error("Failed to allocate an aligned buffer of {elements} f32 elements")]
    Allocation { elements: usize },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("NPY error: {0}")]
    Npy(String),

    #[error("Expected a {expected}-dimensional array, found shape {found:?}")]
    Shape { expected: usize, found: Vec<u64> },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LanewiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: f64) -> Result<String> {
        Ok(serde_json::to_string(&serde_json::Value::from(value))?)
    }

    fn decode(text: &str) -> Result<Vec<f32>> {
        Ok(serde_json::from_str(text)?)
    }

    #[test]
    fn test_json_failure_propagates_as_report_error() {
        assert!(matches!(decode("[1.0, oops]"), Err(LanewiseError::Report(_))));
        assert_eq!(decode("[1.0, 2.5]").unwrap(), vec![1.0, 2.5]);
        assert_eq!(encode(1.5).unwrap(), "1.5");
    }

    #[test]
    fn test_allocation_message_names_the_size() {
        let err = LanewiseError::Allocation { elements: 16 };
        assert_eq!(
            err.to_string(),
            "Failed to allocate an aligned buffer of 16 f32 elements"
        );
    }
}

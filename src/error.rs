//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HetSitesError>;

#[derive(Debug, Error)]
pub enum HetSitesError {
    /// The homogeneity threshold must lie in (0, 1].
    #[error("homogeneous fraction must be in (0, 1], got {fraction}")]
    InvalidArgument { fraction: f64 },

    /// A sequence does not have the alignment length.
    #[error("sequence '{id}' has length {actual}, expected {expected}")]
    LengthMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("an IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

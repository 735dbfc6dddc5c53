//! Error types for building and loading complementarity problems.
//!
//! Solve-time failures (secondary ray, iteration cap) are not errors; they are reported through
//! [`LcpStatus`](crate::math::LcpStatus).

use std::path::PathBuf;
use thiserror::Error;

/// The shapes of `M` and `q` do not describe an `n x n` problem.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    /// `M` is not square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// `q` does not have one entry per row of `M`.
    #[error("q has length {found}, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    /// A row of a matrix literal has a different length from the first row.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while reading or writing a problem file.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid problem json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

pub type DimensionResult<T> = std::result::Result<T, DimensionError>;

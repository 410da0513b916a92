//! Error types for lsh-memo.

use thiserror::Error;

/// Errors raised by hashing and cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    /// Two vectors of different length met in a dot product.
    ///
    /// `expected` is the length of the reference side (the plane, when hashing),
    /// `actual` the length of the offending input.
    #[error("dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Invalid parameter value (plane count, dimension).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, MemoError>;

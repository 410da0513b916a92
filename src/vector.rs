//! Dense vectors and the dot product the hasher is built on.
//!
//! Everything here works in `f64`. Summation is naive left-to-right; no
//! compensated accumulation is attempted.
//!
//! ```rust
//! use lsh_memo::vector::{dot, Vector};
//!
//! let a = Vector::from(vec![1.0, 2.0, 3.0]);
//! let b = Vector::from(vec![4.0, 5.0, 6.0]);
//! assert_eq!(a.dot(&b).unwrap(), 32.0);
//!
//! assert!(dot(&[1.0, 2.0], &[1.0]).is_err());
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{MemoError, Result};

/// Dot product of two equal-length slices.
///
/// Returns [`MemoError::DimensionMismatch`] when the lengths differ; the
/// shorter side is never padded and the longer side is never truncated.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(MemoError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(dot_unchecked(a, b))
}

/// Dot product without the length check. Callers must guarantee `a.len() == b.len()`.
#[inline]
#[must_use]
pub(crate) fn dot_unchecked(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

/// An owned, fixed-length vector of reals.
///
/// The length is fixed at construction; there is no way to push or truncate.
/// Derefs to `[f64]` so it can be passed anywhere a slice is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Box<[f64]>);

impl Vector {
    /// Number of components.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Dot product with another vector; see [`dot`].
    #[inline]
    pub fn dot(&self, other: &[f64]) -> Result<f64> {
        dot(self, other)
    }
}

impl Deref for Vector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Vector {
    fn from(v: Vec<f64>) -> Self {
        Self(v.into_boxed_slice())
    }
}

impl From<&[f64]> for Vector {
    fn from(v: &[f64]) -> Self {
        Self(v.into())
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(v: [f64; N]) -> Self {
        Self(v.into())
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

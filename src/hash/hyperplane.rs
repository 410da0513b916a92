//! Plane sets and the sign-projection hash.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MemoError, Result};
use crate::vector::{dot_unchecked, Vector};

/// Most planes a set may hold: one per bit of the `u64` hash.
pub const MAX_PLANES: usize = u64::BITS as usize;

/// An ordered set of random hyperplane normals, all of one dimension.
///
/// Plane `i` always maps to bit `i` of the hash, so the order is part of the
/// hash space. Hashes produced by two different plane sets are not comparable.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSet {
    planes: Vec<Vector>,
    dimension: usize,
}

impl PlaneSet {
    /// Generate `count` planes of length `dimension` with components drawn
    /// uniformly from `[-1, 1]` using the supplied random source.
    pub fn generate<R: Rng + ?Sized>(count: usize, dimension: usize, rng: &mut R) -> Result<Self> {
        validate(count, dimension)?;

        let planes = (0..count)
            .map(|_| {
                (0..dimension)
                    .map(|_| rng.random_range(-1.0f64..=1.0))
                    .collect::<Vector>()
            })
            .collect();

        Ok(Self { planes, dimension })
    }

    /// Generate from a `StdRng` seeded with `seed`.
    ///
    /// Same `(count, dimension, seed)` always yields the same planes.
    pub fn seeded(count: usize, dimension: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(count, dimension, &mut rng)
    }

    /// Build a plane set from explicit normals.
    ///
    /// Mostly useful in tests, where axis-aligned planes make bucket
    /// boundaries easy to reason about.
    pub fn from_planes(planes: Vec<Vector>) -> Result<Self> {
        let dimension = planes.first().map_or(0, Vector::dim);
        validate(planes.len(), dimension)?;

        if let Some(bad) = planes.iter().find(|p| p.dim() != dimension) {
            return Err(MemoError::DimensionMismatch {
                expected: dimension,
                actual: bad.dim(),
            });
        }

        Ok(Self { planes, dimension })
    }

    /// Hash `v` by the side of each plane it falls on.
    ///
    /// Bit `i` is set when `dot(v, plane_i) >= 0`; a vector lying exactly on a
    /// plane counts as the positive side. A NaN projection leaves the bit clear.
    pub fn hash(&self, v: &[f64]) -> Result<BucketHash> {
        if v.len() != self.dimension {
            return Err(MemoError::DimensionMismatch {
                expected: self.dimension,
                actual: v.len(),
            });
        }

        let mut value = 0u64;
        for (i, plane) in self.planes.iter().enumerate() {
            if dot_unchecked(v, plane) >= 0.0 {
                value |= 1u64 << i;
            }
        }

        Ok(BucketHash {
            value,
            bits: self.planes.len() as u32,
        })
    }

    /// The normals, in bit order.
    pub fn planes(&self) -> &[Vector] {
        &self.planes
    }

    /// Number of planes, i.e. the hash width in bits.
    pub fn count(&self) -> usize {
        self.planes.len()
    }

    /// Dimension every hashed vector must have.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

fn validate(count: usize, dimension: usize) -> Result<()> {
    if count == 0 || count > MAX_PLANES {
        return Err(MemoError::InvalidParameter(format!(
            "plane count must be in 1..={MAX_PLANES}, got {count}"
        )));
    }
    if dimension == 0 {
        return Err(MemoError::InvalidParameter(
            "dimension must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// A bucket identifier: the packed sign bits of one vector against one plane set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketHash {
    value: u64,
    bits: u32,
}

impl BucketHash {
    /// Raw packed bits. Never has a bit set at or above [`bits`](Self::bits).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Width of the hash (the plane count that produced it).
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of planes on which the two vectors fell on different sides.
    ///
    /// Only meaningful between hashes from the same plane set.
    pub fn hamming_distance(&self, other: &BucketHash) -> u32 {
        (self.value ^ other.value).count_ones()
    }
}

impl fmt::Display for BucketHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.bits as usize)
    }
}

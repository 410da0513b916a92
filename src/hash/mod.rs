//! Hash-based bucketing of dense vectors.
//!
//! The cache keys its store on a locality-sensitive hash rather than on exact
//! input equality: similar vectors should land in the same bucket.
//!
//! ## Random Hyperplane LSH
//!
//! Draw `k` random normals `r_1..r_k`. Each one splits space into two
//! half-spaces through the origin; bit `i` records which side a vector is on.
//!
//! ```text
//! P[sign(r·a) = sign(r·b)] = 1 - θ(a,b)/π
//! ```
//!
//! where θ is the angle between `a` and `b`. With `k` independent planes the
//! probability that two vectors share a whole `k`-bit hash is that quantity
//! raised to the `k`, so collisions fall off quickly with angle as `k` grows.
//!
//! Note that only direction matters: `a` and `2a` always share a bucket.
//!
//! ```rust
//! use lsh_memo::hash::PlaneSet;
//! use lsh_memo::vector::Vector;
//!
//! let planes = PlaneSet::from_planes(vec![
//!     Vector::from([1.0, 0.0]),
//!     Vector::from([0.0, 1.0]),
//! ])
//! .unwrap();
//!
//! assert_eq!(planes.hash(&[0.5, 0.5]).unwrap().value(), 0b11);
//! assert_eq!(planes.hash(&[-0.5, 0.5]).unwrap().value(), 0b10);
//! ```
//!
//! ## References
//!
//! - Charikar (2002). "Similarity estimation techniques from rounding algorithms."

mod hyperplane;

pub use hyperplane::{BucketHash, PlaneSet, MAX_PLANES};

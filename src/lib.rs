//! lsh-memo: approximate memoization keyed on locality-sensitive hashes.
//!
//! An ordinary memo cache only helps when an input repeats exactly. This crate
//! buckets real-valued input vectors with random hyperplane LSH instead, so an
//! expensive function evaluated once per bucket can answer for every *similar*
//! input that lands there afterwards.
//!
//! - `vector`: `Vector` and the checked dot product
//! - `hash`: `PlaneSet` and `BucketHash` (sign projection onto random hyperplanes)
//! - `cache`: `ApproxCache`, the cache-or-compute store
//! - `config`: `CacheConfig`
//! - `harness`: seeded direct-vs-cached comparison runs
//!
//! ```rust
//! use lsh_memo::{ApproxCache, CacheConfig};
//!
//! let cache: ApproxCache = ApproxCache::new(&CacheConfig::new(3).with_seed(42)).unwrap();
//! let expensive = |v: &[f64]| v.iter().map(|x| x.sin()).sum::<f64>();
//!
//! let first = cache.get_or_compute(&[0.3, 0.2, 0.1], expensive).unwrap();
//! // Same direction, so the same bucket: the first result comes back.
//! let second = cache.get_or_compute(&[0.6, 0.4, 0.2], expensive).unwrap();
//! assert_eq!(first, second);
//! ```
//!
//! # Critical Nuances
//!
//! ## Results are approximate by construction
//!
//! A hit returns the value computed for some earlier vector in the same bucket,
//! never `f(v)` for the vector you passed. Only use this where `f` varies
//! slowly with the *direction* of its input.
//!
//! ## Magnitude is invisible
//!
//! Hyperplanes pass through the origin, so `v` and `c·v` (for `c > 0`) always
//! share a bucket. Center or normalize inputs if magnitude matters to `f`.
//!
//! ## Plane count is the only knob
//!
//! At most 2^k buckets exist for `k` planes. Few planes give many hits and
//! coarse answers; 64 planes (the maximum) give fine buckets and fewer hits.
//!
//! ## The store never shrinks
//!
//! There is no eviction. Memory grows with the number of distinct buckets
//! visited until the cache is dropped.

pub mod cache;
pub mod config;
pub mod error;
pub mod harness;
pub mod hash;
pub mod vector;

// Re-exports
pub use cache::{ApproxCache, CacheStats};
pub use config::CacheConfig;
pub use error::{MemoError, Result};
pub use hash::{BucketHash, PlaneSet, MAX_PLANES};
pub use vector::{dot, Vector};

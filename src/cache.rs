//! The approximate memoization cache.
//!
//! [`ApproxCache`] owns one [`PlaneSet`] and one store mapping bucket hashes to
//! results. A lookup hashes the input; if that bucket already holds a value it
//! is returned as-is, otherwise the expensive function runs and its result
//! becomes the bucket's value for the life of the cache.
//!
//! ## Staleness
//!
//! A hit returns whatever was computed for the *first* vector that landed in
//! the bucket. For any later vector in the bucket the result is an
//! approximation, not `f(v)`. Entries are never updated or evicted.
//!
//! ## Concurrency
//!
//! The store lock is held from the lookup through the expensive call to the
//! write. The function therefore runs at most once per bucket even under
//! contention, at the cost of serializing misses. `compute` must not call back
//! into the same cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{MemoError, Result};
use crate::hash::{BucketHash, PlaneSet};

/// Cache keyed on the LSH bucket of the input rather than on the input itself.
#[derive(Debug)]
pub struct ApproxCache<V = f64> {
    planes: PlaneSet,
    store: Mutex<HashMap<BucketHash, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ApproxCache<V> {
    /// Generate planes from `config` and start with an empty store.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let planes = config.build_planes()?;
        debug!(
            planes = config.planes,
            dimension = config.dimension,
            seeded = config.seed.is_some(),
            "created approximate cache"
        );
        Ok(Self::with_planes(planes))
    }

    /// Use an existing plane set, e.g. one generated from an injected RNG.
    pub fn with_planes(planes: PlaneSet) -> Self {
        Self {
            planes,
            store: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the bucket's cached value, or run `compute` and cache its result.
    ///
    /// Only fails on a dimension mismatch, before `compute` is considered.
    pub fn get_or_compute<F>(&self, v: &[f64], compute: F) -> Result<V>
    where
        F: FnOnce(&[f64]) -> V,
    {
        self.try_get_or_compute(v, |x| Ok::<V, MemoError>(compute(x)))
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for a fallible function.
    ///
    /// An error from `compute` is returned unchanged and nothing is stored, so
    /// the next lookup in that bucket computes again.
    pub fn try_get_or_compute<F, E>(&self, v: &[f64], compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce(&[f64]) -> std::result::Result<V, E>,
        E: From<MemoError>,
    {
        let bucket = self.planes.hash(v)?;
        let mut store = self.store.lock();

        if let Some(value) = store.get(&bucket) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(%bucket, "cache hit");
            return Ok(value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute(v)?;
        store.insert(bucket, value.clone());
        debug!(%bucket, entries = store.len(), "cache miss, stored result");
        Ok(value)
    }

    /// Cached value for `v`'s bucket, without computing or touching the counters.
    pub fn peek(&self, v: &[f64]) -> Result<Option<V>> {
        let bucket = self.planes.hash(v)?;
        Ok(self.store.lock().get(&bucket).cloned())
    }
}

impl<V> ApproxCache<V> {
    /// Bucket `v` would be stored under.
    pub fn bucket_of(&self, v: &[f64]) -> Result<BucketHash> {
        self.planes.hash(v)
    }

    pub fn planes(&self) -> &PlaneSet {
        &self.planes
    }

    /// Number of occupied buckets.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Snapshot of hit/miss counters and store size.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Counters reported by [`ApproxCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the store.
    pub hits: u64,
    /// Lookups that ran the expensive function, including ones that failed.
    pub misses: u64,
    /// Occupied buckets.
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups that were hits, in `[0, 1]`. Zero before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

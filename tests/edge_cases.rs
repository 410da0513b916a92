//! Edge case tests for lsh-memo.
//!
//! Bucket boundaries, error propagation, and shared use across threads.

use lsh_memo::{ApproxCache, CacheConfig, MemoError, PlaneSet, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn axis_cache() -> ApproxCache {
    let planes =
        PlaneSet::from_planes(vec![Vector::from([1.0, 0.0]), Vector::from([0.0, 1.0])]).unwrap();
    ApproxCache::with_planes(planes)
}

fn sum(v: &[f64]) -> f64 {
    v.iter().sum()
}

// =============================================================================
// Bucketing
// =============================================================================

#[test]
fn axis_plane_scenario() {
    let cache = axis_cache();
    let calls = AtomicUsize::new(0);
    let f = |v: &[f64]| {
        calls.fetch_add(1, Ordering::SeqCst);
        sum(v)
    };

    assert_eq!(cache.bucket_of(&[0.5, 0.5]).unwrap().value(), 3);
    assert_eq!(cache.get_or_compute(&[0.5, 0.5], f).unwrap(), 1.0);

    // Same signs on both planes: reuses A's result although sum(B) = 1.8.
    assert_eq!(cache.bucket_of(&[0.9, 0.9]).unwrap().value(), 3);
    assert_eq!(cache.get_or_compute(&[0.9, 0.9], f).unwrap(), 1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(cache.bucket_of(&[-0.5, 0.5]).unwrap().value(), 2);
    assert_eq!(cache.get_or_compute(&[-0.5, 0.5], f).unwrap(), 0.0);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn orthogonal_vector_lands_on_positive_side() {
    let cache = axis_cache();
    cache.get_or_compute(&[1.0, 1.0], |_| 7.0).unwrap();
    // dot with plane 0 is exactly 0, so bit 0 is set and this is bucket 3.
    assert_eq!(cache.get_or_compute(&[0.0, 2.0], |_| -1.0).unwrap(), 7.0);
}

#[test]
fn injected_rng_matches_seeded_constructor() {
    let mut rng = StdRng::seed_from_u64(17);
    let injected = PlaneSet::generate(10, 5, &mut rng).unwrap();
    assert_eq!(injected, PlaneSet::seeded(10, 5, 17).unwrap());
}

#[test]
fn configs_with_equal_seeds_bucket_identically() {
    let cfg = CacheConfig::new(4).with_seed(123);
    let a: ApproxCache = ApproxCache::new(&cfg).unwrap();
    let b: ApproxCache = ApproxCache::new(&cfg).unwrap();
    let v = [0.1, -0.7, 0.3, 0.9];
    assert_eq!(a.bucket_of(&v).unwrap(), b.bucket_of(&v).unwrap());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn wrong_dimension_is_reported_not_truncated() {
    let cache = axis_cache();
    assert_eq!(
        cache.get_or_compute(&[1.0], sum),
        Err(MemoError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        cache.peek(&[]),
        Err(MemoError::DimensionMismatch {
            expected: 2,
            actual: 0
        })
    );
}

#[derive(Debug, PartialEq)]
enum PayloadError {
    Cache(MemoError),
    Failed(&'static str),
}

impl From<MemoError> for PayloadError {
    fn from(e: MemoError) -> Self {
        PayloadError::Cache(e)
    }
}

#[test]
fn compute_failure_propagates_and_stores_nothing() {
    let cache = axis_cache();
    let err = cache
        .try_get_or_compute(&[0.5, 0.5], |_| Err(PayloadError::Failed("boom")))
        .unwrap_err();
    assert_eq!(err, PayloadError::Failed("boom"));
    assert!(cache.is_empty());

    // Retrying the bucket computes again and then sticks.
    let ok: Result<f64, PayloadError> = cache.try_get_or_compute(&[0.5, 0.5], |v| Ok(sum(v)));
    assert_eq!(ok, Ok(1.0));
    assert_eq!(cache.stats().misses, 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn dimension_errors_convert_into_caller_error() {
    let cache = axis_cache();
    let err = cache
        .try_get_or_compute(&[1.0, 2.0, 3.0], |v| Ok::<f64, PayloadError>(sum(v)))
        .unwrap_err();
    assert_eq!(
        err,
        PayloadError::Cache(MemoError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn compute_panic_leaves_store_usable() {
    let cache = axis_cache();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        cache.get_or_compute(&[0.5, 0.5], |_| panic!("payload panicked"))
    }));
    assert!(result.is_err());
    assert!(cache.is_empty());
    assert_eq!(cache.get_or_compute(&[0.5, 0.5], sum).unwrap(), 1.0);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_misses_compute_once_per_bucket() {
    let cache: Arc<ApproxCache> = Arc::new(axis_cache());
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                let v = [0.1 + t as f64, 0.2 + t as f64];
                cache
                    .get_or_compute(&v, |x| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(5));
                        sum(x)
                    })
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.stats().hits, 7);
}

//! Benchmark harness: the same seeded workload run directly and through the cache.
//!
//! The payload is [`slow_sum`], which sums components with a fixed sleep per
//! component to stand in for an expensive function. Nothing in the cache
//! depends on this module.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{ApproxCache, CacheStats};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::vector::Vector;

/// Sum of components, sleeping `delay` before each one.
pub fn slow_sum(v: &[f64], delay: Duration) -> f64 {
    let mut result = 0.0;
    for &c in v {
        thread::sleep(delay);
        result += c;
    }
    result
}

/// `n` vectors of length `dimension`, components uniform in `[-1, 1]`.
pub fn random_inputs(n: usize, dimension: usize, seed: u64) -> Vec<Vector> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| random_vector(&mut rng, dimension)).collect()
}

fn random_vector<R: Rng + ?Sized>(rng: &mut R, dimension: usize) -> Vector {
    (0..dimension)
        .map(|_| rng.random_range(-1.0f64..=1.0))
        .collect()
}

/// Workload shape for [`run_comparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Number of input vectors per pass.
    pub samples: usize,
    /// Per-component delay inside [`slow_sum`].
    pub delay: Duration,
    /// Seed for the input stream; both passes see identical inputs.
    pub input_seed: u64,
    /// Cache shape. Its `dimension` is also the input dimension.
    pub cache: CacheConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            delay: Duration::from_nanos(1_000),
            input_seed: 0,
            cache: CacheConfig::default(),
        }
    }
}

/// Outcome of one direct pass and one cached pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub samples: usize,
    pub direct_sum: f64,
    pub direct_elapsed: Duration,
    pub cached_sum: f64,
    pub cached_elapsed: Duration,
    pub stats: CacheStats,
}

impl ComparisonReport {
    /// Percentage of lookups that did not need a fresh computation.
    pub fn hit_percent(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        100.0 * (self.samples - self.stats.entries) as f64 / self.samples as f64
    }

    /// Relative error of the cached total against the direct total, in percent.
    pub fn diff_percent(&self) -> f64 {
        if self.direct_sum == 0.0 {
            return if self.cached_sum == 0.0 { 0.0 } else { f64::INFINITY };
        }
        100.0 * ((self.direct_sum - self.cached_sum) / self.direct_sum).abs()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calc\t= {:.6}\tin {:?}", self.direct_sum, self.direct_elapsed)?;
        writeln!(f, "Cache\t= {:.6}\tin {:?}", self.cached_sum, self.cached_elapsed)?;
        writeln!(f, "\t{:3.2}% diff", self.diff_percent())?;
        write!(f, "\t{:3.2}% hits", self.hit_percent())
    }
}

/// Run the workload twice over the same seeded input stream: once calling
/// [`slow_sum`] directly, once through a fresh [`ApproxCache`].
pub fn run_comparison(config: &HarnessConfig) -> Result<ComparisonReport> {
    let dimension = config.cache.dimension;
    let cache: ApproxCache = ApproxCache::new(&config.cache)?;

    let mut rng = StdRng::seed_from_u64(config.input_seed);
    let start = Instant::now();
    let mut direct_sum = 0.0;
    for _ in 0..config.samples {
        let v = random_vector(&mut rng, dimension);
        direct_sum += slow_sum(&v, config.delay);
    }
    let direct_elapsed = start.elapsed();

    let mut rng = StdRng::seed_from_u64(config.input_seed);
    let start = Instant::now();
    let mut cached_sum = 0.0;
    for _ in 0..config.samples {
        let v = random_vector(&mut rng, dimension);
        cached_sum += cache.get_or_compute(&v, |x| slow_sum(x, config.delay))?;
    }
    let cached_elapsed = start.elapsed();

    let report = ComparisonReport {
        samples: config.samples,
        direct_sum,
        direct_elapsed,
        cached_sum,
        cached_elapsed,
        stats: cache.stats(),
    };
    info!(
        samples = report.samples,
        entries = report.stats.entries,
        hit_percent = report.hit_percent(),
        diff_percent = report.diff_percent(),
        "comparison finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_sum_adds_components() {
        assert_eq!(slow_sum(&[0.25, 0.5, -1.0], Duration::ZERO), -0.25);
    }

    #[test]
    fn random_inputs_are_reproducible_and_bounded() {
        let a = random_inputs(50, 4, 3);
        let b = random_inputs(50, 4, 3);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| v.dim() == 4));
        assert!(a.iter().flat_map(|v| v.iter()).all(|c| (-1.0..=1.0).contains(c)));
    }

    #[test]
    fn exact_when_every_input_gets_its_own_bucket() {
        // A single vector per pass cannot collide with anything.
        let config = HarnessConfig {
            samples: 1,
            delay: Duration::ZERO,
            input_seed: 4,
            cache: CacheConfig::new(3).with_seed(1),
        };
        let report = run_comparison(&config).unwrap();
        assert_eq!(report.direct_sum, report.cached_sum);
        assert_eq!(report.diff_percent(), 0.0);
        assert_eq!(report.hit_percent(), 0.0);
    }

    #[test]
    fn few_planes_produce_hits() {
        // One plane means at most two buckets.
        let config = HarnessConfig {
            samples: 200,
            delay: Duration::ZERO,
            input_seed: 9,
            cache: CacheConfig::new(6).with_planes(1).with_seed(2),
        };
        let report = run_comparison(&config).unwrap();
        assert!(report.stats.entries <= 2);
        assert!(report.hit_percent() >= 99.0);
        assert_eq!(report.stats.hits + report.stats.misses, 200);
    }

    #[test]
    fn report_renders_both_passes() {
        let report = ComparisonReport {
            samples: 4,
            direct_sum: 2.0,
            direct_elapsed: Duration::from_millis(3),
            cached_sum: 1.5,
            cached_elapsed: Duration::from_millis(1),
            stats: CacheStats {
                hits: 2,
                misses: 2,
                entries: 2,
            },
        };
        let text = report.to_string();
        assert!(text.starts_with("Calc\t= 2.000000"));
        assert!(text.contains("Cache\t= 1.500000"));
        assert!(text.contains("25.00% diff"));
        assert!(text.contains("50.00% hits"));
    }
}

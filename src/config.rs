//! Cache construction parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MemoError, Result};
use crate::hash::{PlaneSet, MAX_PLANES};

/// Shape and seeding of an [`ApproxCache`](crate::ApproxCache).
///
/// More planes means narrower buckets: fewer hits, smaller error on a hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of hyperplanes (hash width in bits), `1..=64`.
    pub planes: usize,
    /// Input vector dimension.
    pub dimension: usize,
    /// Seed for plane generation. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            planes: MAX_PLANES,
            dimension: 6,
            seed: None,
        }
    }
}

impl CacheConfig {
    /// Config for `dimension`-length inputs with the default plane count.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Fix the plane-generation seed so the bucket layout is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_planes(mut self, planes: usize) -> Self {
        self.planes = planes;
        self
    }

    /// Check ranges without generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.planes == 0 || self.planes > MAX_PLANES {
            return Err(MemoError::InvalidParameter(format!(
                "planes must be in 1..={MAX_PLANES}, got {}",
                self.planes
            )));
        }
        if self.dimension == 0 {
            return Err(MemoError::InvalidParameter(
                "dimension must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate the plane set this config describes.
    pub fn build_planes(&self) -> Result<PlaneSet> {
        self.validate()?;
        // Use an explicit seed when configured; otherwise derive one from entropy.
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        PlaneSet::generate(self.planes, self.dimension, &mut rng)
    }
}

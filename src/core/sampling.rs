use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StepwiseError};

/// Normal distribution restricted to the closed interval `[low, high]` by rejection.
///
/// Draws are repeated until one lands inside the interval; there is no bound on the number of
/// attempts. Intervals that carry next to no probability mass under the normal distribution will
/// therefore take arbitrarily long to sample and have to be avoided by the caller.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedNormal {
    normal: Normal<f64>,
    low: f64,
    high: f64,
}

impl TruncatedNormal {
    pub fn new(mean: f64, sigma: f64, low: f64, high: f64) -> Result<Self> {
        if !(low <= high) {
            return Err(StepwiseError::InitializationError(format!(
                "truncation interval is empty: [{low}, {high}]"
            )));
        }
        if !mean.is_finite() || !(sigma >= 0.0) {
            return Err(StepwiseError::InitializationError(format!(
                "invalid normal distribution N({mean}, {sigma})"
            )));
        }
        let normal = Normal::new(mean, sigma).map_err(|err| {
            StepwiseError::InitializationError(format!(
                "invalid normal distribution N({mean}, {sigma}): {err}"
            ))
        })?;
        Ok(Self { normal, low, high })
    }
}

impl Distribution<f64> for TruncatedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            let draw = self.normal.sample(rng);
            if self.low <= draw && draw <= self.high {
                return draw;
            }
        }
    }
}

/// Serializable parameters of a [`TruncatedNormal`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TruncatedNormalParameters {
    pub mean: f64,
    pub sigma: f64,
    pub low: f64,
    pub high: f64,
}

impl TruncatedNormalParameters {
    pub fn distribution(&self) -> Result<TruncatedNormal> {
        TruncatedNormal::new(self.mean, self.sigma, self.low, self.high)
    }
}

//! Truncated distribution samplers for packet sizes.
//!
//! Both samplers draw from a caller-provided RNG and keep no mutable state
//! of their own, so a run's entire random sequence flows through the single
//! seeded generator owned by the simulation.

use rand::Rng;
use rand_distr::{Distribution, Pareto};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{SimError, SimResult};

/// Pareto variate shifted to `min` and capped at `max`.
///
/// Samples `min(min + Pareto(scale = 1, shape), max)`, matching the standard
/// Pareto variate (which is always >= 1).
#[derive(Debug, Clone)]
pub struct TruncatedPareto {
    min: f64,
    max: f64,
    pareto: Pareto<f64>,
}

impl TruncatedPareto {
    pub fn new(min: f64, max: f64, shape: f64) -> SimResult<Self> {
        if !(min < max) {
            return Err(SimError::InvalidConfig(format!(
                "pareto bounds must satisfy min < max, got [{min}, {max}]"
            )));
        }
        let pareto = Pareto::new(1.0, shape)
            .map_err(|e| SimError::InvalidConfig(format!("pareto shape {shape}: {e}")))?;
        Ok(TruncatedPareto { min, max, pareto })
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (self.min + self.pareto.sample(rng)).min(self.max)
    }
}

/// Log-normal variate truncated to `[min, max]` on the linear scale.
///
/// The bounds are mapped to z-scores with `(ln(bound) - mu) / sigma`, a
/// standard normal draw is restricted to that range by inverse-CDF sampling,
/// mapped back through `mu + sigma * z`, and exponentiated. The final value
/// is clamped to the bounds to absorb inverse-CDF rounding at the edges.
#[derive(Debug, Clone)]
pub struct TruncatedLogNormal {
    min: f64,
    max: f64,
    mu: f64,
    sigma: f64,
    cdf_lo: f64,
    cdf_hi: f64,
    std_normal: Normal,
}

impl TruncatedLogNormal {
    pub fn new(min: f64, max: f64, mu: f64, sigma: f64) -> SimResult<Self> {
        if min <= 0.0 || !(min < max) {
            return Err(SimError::InvalidConfig(format!(
                "log-normal bounds must satisfy 0 < min < max, got [{min}, {max}]"
            )));
        }
        if sigma <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "log-normal sigma must be positive, got {sigma}"
            )));
        }
        let std_normal = Normal::new(0.0, 1.0)
            .map_err(|e| SimError::InvalidConfig(format!("standard normal: {e}")))?;
        let cdf_lo = std_normal.cdf((min.ln() - mu) / sigma);
        let cdf_hi = std_normal.cdf((max.ln() - mu) / sigma);
        Ok(TruncatedLogNormal {
            min,
            max,
            mu,
            sigma,
            cdf_lo,
            cdf_hi,
            std_normal,
        })
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = self.cdf_lo + rng.gen::<f64>() * (self.cdf_hi - self.cdf_lo);
        let z = self.std_normal.inverse_cdf(u);
        (self.mu + self.sigma * z).exp().clamp(self.min, self.max)
    }
}

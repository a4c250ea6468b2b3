//! Seeded Monte Carlo confidence band.
//!
//! Each input to the product (the base rate and every factor) carries a
//! relative sampling error `sigma = min(max_sigma, 1 / sqrt(n + 1))` where `n`
//! is the number of events behind it. A trial multiplies the point estimate
//! by `exp(sigma_i * z_i)` for every input, with independent standard normal
//! `z_i`, and clamps to [0, 1].

use nhf_common::ConfidenceInterval;
use nhf_math::{
    central_band, lognormal_multiplier, poisson_relative_sigma, standard_normal_from_uniforms,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative uncertainty of one multiplicative input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputUncertainty {
    pub sample_size: u32,
    pub sigma: f64,
}

impl InputUncertainty {
    pub fn from_count(sample_size: u32, max_sigma: f64) -> Self {
        Self {
            sample_size,
            sigma: poisson_relative_sigma(sample_size, max_sigma),
        }
    }
}

/// Resample the point estimate `trials` times and take the central band.
///
/// The band is widened to contain `point` and clamped to [0, 1]. The same
/// seed always yields the same band.
pub fn monte_carlo_interval(
    point: f64,
    inputs: &[InputUncertainty],
    trials: u32,
    level: f64,
    seed: u64,
) -> ConfidenceInterval {
    let point = point.clamp(0.0, 1.0);
    let trials = trials.max(1);
    let mut rng = StdRng::seed_from_u64(seed);

    let samples: Vec<f64> = (0..trials)
        .map(|_| {
            let noise: f64 = inputs
                .iter()
                .map(|input| {
                    let u1 = 1.0 - rng.random::<f64>();
                    let u2 = rng.random::<f64>();
                    lognormal_multiplier(standard_normal_from_uniforms(u1, u2), input.sigma)
                })
                .product();
            (point * noise).clamp(0.0, 1.0)
        })
        .collect();

    let band = central_band(&samples, level);
    let low = if band.low.is_finite() { band.low.min(point) } else { point };
    let high = if band.high.is_finite() { band.high.max(point) } else { point };

    ConfidenceInterval {
        low: low.clamp(0.0, 1.0),
        high: high.clamp(0.0, 1.0),
        level,
        trials,
    }
}

//! Normal draws from caller-supplied uniforms.
//!
//! Kept free of any RNG dependency: callers own their generator and pass the
//! uniforms in, which keeps every simulation reproducible from its seed.

use std::f64::consts::TAU;

/// Box-Muller transform: two uniforms → one standard normal draw.
///
/// `u1` must lie in (0, 1]; values at or below zero are nudged to the smallest
/// positive double so the log stays finite.
pub fn standard_normal_from_uniforms(u1: f64, u2: f64) -> f64 {
    let u1 = if u1 > 0.0 { u1.min(1.0) } else { f64::MIN_POSITIVE };
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Log-normal multiplicative noise with median 1: `exp(sigma * z)`.
pub fn lognormal_multiplier(z: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 || !sigma.is_finite() {
        return 1.0;
    }
    (sigma * z).exp()
}

/// Relative sampling error of a Poisson count, `1 / sqrt(n + 1)`, capped.
pub fn poisson_relative_sigma(count: u32, cap: f64) -> f64 {
    let raw = 1.0 / ((count as f64) + 1.0).sqrt();
    raw.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_muller_known_point() {
        // u1 = e^-0.5 → sqrt(1) = 1; u2 = 0 → cos(0) = 1
        let z = standard_normal_from_uniforms((-0.5f64).exp(), 0.0);
        assert!((z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn box_muller_zero_uniform_is_finite() {
        let z = standard_normal_from_uniforms(0.0, 0.25);
        assert!(z.is_finite());
    }

    #[test]
    fn lognormal_median_is_one() {
        assert_eq!(lognormal_multiplier(0.0, 0.4), 1.0);
        assert_eq!(lognormal_multiplier(2.0, 0.0), 1.0);
        assert!(lognormal_multiplier(1.0, 0.5) > 1.0);
        assert!(lognormal_multiplier(-1.0, 0.5) < 1.0);
    }

    #[test]
    fn relative_sigma_shrinks_with_count() {
        assert_eq!(poisson_relative_sigma(0, 0.5), 0.5);
        assert!((poisson_relative_sigma(3, 1.0) - 0.5).abs() < 1e-15);
        assert!(poisson_relative_sigma(99, 1.0) < poisson_relative_sigma(9, 1.0));
    }
}

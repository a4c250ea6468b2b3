//! Waiting-time and counting-process helpers.
//!
//! Daily no-hitter counts are treated as Poisson and the gaps between them as
//! exponential. Both forms are evaluated through `expm1` so that the tiny
//! rates involved (a few thousandths per day) keep full precision.

/// Probability of at least one event when the count is Poisson(`lambda`).
///
/// `P(N >= 1) = 1 - exp(-lambda)`. Returns 0 for non-positive or NaN input
/// and 1 for an infinite rate.
pub fn poisson_at_least_one(lambda: f64) -> f64 {
    if lambda.is_nan() || lambda <= 0.0 {
        return 0.0;
    }
    if lambda == f64::INFINITY {
        return 1.0;
    }
    -(-lambda).exp_m1()
}

/// Exponential CDF with the given mean: `1 - exp(-t / mean)`.
///
/// Negative elapsed time is treated as zero. A non-positive mean yields NaN.
pub fn exponential_cdf(t: f64, mean: f64) -> f64 {
    if t.is_nan() || mean.is_nan() || mean <= 0.0 {
        return f64::NAN;
    }
    if t <= 0.0 {
        return 0.0;
    }
    if t == f64::INFINITY {
        return 1.0;
    }
    -(-t / mean).exp_m1()
}

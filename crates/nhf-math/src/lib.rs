//! No-hitter forecaster math utilities.

pub mod math;

pub use math::normal::*;
pub use math::sample::*;
pub use math::waiting::*;

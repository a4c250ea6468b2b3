//! Core math modules.

pub mod normal;
pub mod sample;
pub mod waiting;

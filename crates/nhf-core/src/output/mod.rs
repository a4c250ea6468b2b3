//! Rendering of command results.
//!
//! Every result the CLI prints implements [`Render`]: JSON comes from serde,
//! Markdown and the one-line summary are written by hand per type.

mod prediction;
mod reports;

pub use reports::{ConfigView, DataUpdateView, HistoryView, StatusView};

use nhf_common::{OutputFormat, Result};
use serde::Serialize;

/// A value the CLI can print in every [`OutputFormat`].
pub trait Render: Serialize {
    /// Multi-line Markdown document.
    fn markdown(&self) -> String;

    /// Single line for quick checks and shell scripts.
    fn summary(&self) -> String;
}

/// Render `value` in the requested format.
pub fn render<T: Render + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Md => value.markdown(),
        OutputFormat::Summary => value.summary(),
    })
}

/// `0.0931` → `9.31%`.
pub fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Multiplier with a direction marker, e.g. `×1.81 ↑`.
pub(crate) fn multiplier(m: f64) -> String {
    let arrow = if m > 1.0 + 1e-9 {
        " ↑"
    } else if m < 1.0 - 1e-9 {
        " ↓"
    } else {
        ""
    };
    format!("×{m:.3}{arrow}")
}

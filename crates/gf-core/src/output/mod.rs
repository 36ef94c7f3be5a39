//! Rendering reports for stdout.

pub mod summary;

use gf_common::{OutputFormat, Result};
use serde::Serialize;

pub use summary::{render_assessment, render_forecast, render_snapshot};

/// Serialize `value` for a machine-readable format.
///
/// `Summary` falls back to pretty JSON; callers with a text renderer handle it first.
pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Jsonl => serde_json::to_string(value)?,
        OutputFormat::Json | OutputFormat::Summary => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

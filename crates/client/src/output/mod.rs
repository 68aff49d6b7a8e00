//! Output formatting functions.

pub mod json;
pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Renders `value` for the selected format. JSON serialization failures are
/// returned; `pretty` is only called for pretty output.
pub fn render<T, F>(format: OutputFormat, value: &T, pretty: F) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => Ok(pretty()),
    }
}

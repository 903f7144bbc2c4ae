//! Output formatting for CLI results.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Serializes `value` as compact JSON, or indented JSON for `Pretty`.
///
/// Commands with a dedicated human-readable layout use [`pretty`] instead.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

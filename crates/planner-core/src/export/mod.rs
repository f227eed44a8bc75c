// ABOUTME: Module root for event summary exporters (Markdown, YAML, JSON).
// ABOUTME: Defines ExportFormat and a render() entry point dispatching to each exporter.

pub mod json;
pub mod markdown;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use json::export_json;
pub use markdown::export_markdown;
pub use yaml::export_yaml;

use crate::summary::EventSummary;

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("yaml export error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for event summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Yaml,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Json => "json",
        })
    }
}

/// Render summaries in the requested format. `currency` prefixes amounts in
/// Markdown; structured formats carry plain numbers.
pub fn render(
    format: ExportFormat,
    summaries: &[EventSummary],
    currency: &str,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Markdown => Ok(export_markdown(summaries, currency)),
        ExportFormat::Yaml => Ok(export_yaml(summaries)?),
        ExportFormat::Json => Ok(export_json(summaries)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_aliases() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("YAML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("csv".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Yaml.to_string(), "yaml");
    }
}

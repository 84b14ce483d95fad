//! Report rendering: raw records, markdown tables, or a compact catalog.

pub mod compact;
pub mod markdown;

use std::fmt;
use std::str::FromStr;

use apimap_core::errors::ReportError;

use crate::scan::ScanReport;

pub use compact::{compact_endpoints, endpoint_id, CompactEndpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Every record, field-complete, as a JSON array.
    Raw,
    /// Sectioned tables with counts.
    #[default]
    Markdown,
    /// JSON array of `{id, method, path, description}`, one per endpoint.
    Compact,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Markdown => "markdown",
            Self::Compact => "compact",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "json" => Ok(Self::Raw),
            "markdown" | "md" => Ok(Self::Markdown),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Raw => Ok(serde_json::to_string_pretty(&report.records)?),
        OutputFormat::Markdown => Ok(markdown::render_markdown(report)),
        OutputFormat::Compact => Ok(serde_json::to_string_pretty(&compact_endpoints(&report.records))?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for name in apimap_core::constants::OUTPUT_FORMATS {
            let format: OutputFormat = name.parse().unwrap();
            assert_eq!(format.as_str(), *name);
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }
}

//! Pipeline errors: the error type of a full scan invocation.

use super::error_code::ApimapErrorCode;
use super::{CatalogError, ConfigError, ReportError, ScanError};

/// Errors that can end a scan invocation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl PipelineError {
    /// True for operator input problems (missing root, bad config).
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::Scan(e) => e.is_fatal(),
            Self::Config(_) => true,
            Self::Catalog(_) | Self::Report(_) => false,
        }
    }
}

impl ApimapErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
        }
    }
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

//! Pattern catalog errors.

use super::error_code::{self, ApimapErrorCode};

/// Errors raised while compiling the pattern catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid pattern for {library}: {message}")]
    InvalidPattern { library: String, message: String },
}

impl ApimapErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        error_code::CATALOG_ERROR
    }
}

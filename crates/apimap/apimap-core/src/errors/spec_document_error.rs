//! Spec-document errors. Always recovered: a bad document yields no records.

use super::error_code::{self, ApimapErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum SpecDocumentError {
    #[error("Malformed spec document {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("No openapi/swagger marker in {path}")]
    MissingMarker { path: String },
}

impl ApimapErrorCode for SpecDocumentError {
    fn error_code(&self) -> &'static str {
        error_code::SPEC_DOCUMENT_ERROR
    }
}

//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, ApimapErrorCode};

/// Errors that can occur while walking and reading a project tree.
///
/// Only the root variants are fatal. Per-file variants are produced while
/// reading individual files and are recovered by the walker.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Path '{}' does not exist", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Path '{}' is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {} ({size} bytes, max {max})", path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("File is not valid UTF-8: {}", path.display())]
    UnsupportedEncoding { path: PathBuf },
}

impl ScanError {
    /// Whether this error aborts the whole scan rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RootNotFound { .. } | Self::RootNotDirectory { .. })
    }
}

impl ApimapErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        if self.is_fatal() {
            error_code::INPUT_ERROR
        } else {
            error_code::SCAN_ERROR
        }
    }
}

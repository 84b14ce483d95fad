//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_FILE_SIZE, DEFAULT_THREADS};

/// Configuration for the directory walk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Extra gitignore-style patterns, on top of the fixed pruned set.
    pub extra_ignore: Vec<String>,
    /// Maximum file size in bytes. Default: 1MB.
    pub max_file_size: Option<u64>,
    /// Worker threads for reading and extraction. Default: 0 (auto).
    pub threads: Option<usize>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    /// Returns whether symlinks are followed, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}

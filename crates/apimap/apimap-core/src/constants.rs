//! Shared constants for the apimap scanner.

/// Name of the project-level config file looked up at the scan root.
pub const PROJECT_CONFIG_FILE: &str = "apimap.toml";

/// Maximum file size in bytes for scanning (default: 1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Default number of threads (0 = auto-detect).
pub const DEFAULT_THREADS: usize = 0;

/// Default output format name.
pub const DEFAULT_OUTPUT_FORMAT: &str = "markdown";

/// Accepted output format names.
pub const OUTPUT_FORMATS: &[&str] = &["raw", "markdown", "compact"];

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "apimap=warn";

/// Directory names never descended into, at any depth.
pub const DEFAULT_PRUNED_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    "dist",
    "build",
    "out",
    "coverage",
    "target",
    "vendor",
    "__pycache__",
    "venv",
    "site-packages",
];

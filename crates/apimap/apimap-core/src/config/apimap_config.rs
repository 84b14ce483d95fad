//! Top-level apimap configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{OutputConfig, ScanConfig};
use crate::constants::{OUTPUT_FORMATS, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Config file (`--config` path, else `apimap.toml` in the scan root)
/// 3. Compiled defaults
///
/// There is no environment layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ApimapConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub extra_ignore: Vec<String>,
    pub max_file_size: Option<u64>,
    pub threads: Option<usize>,
    pub follow_symlinks: Option<bool>,
    pub format: Option<String>,
    pub log_level: Option<String>,
}

impl ApimapConfig {
    /// Load configuration for a scan of `root`.
    ///
    /// An explicit `config_path` must exist. Without one, `apimap.toml` in
    /// `root` is used when present; a missing project file is not an error.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.is_file() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ApimapConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref format) = config.output.format {
            if !OUTPUT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "output.format".to_string(),
                    message: format!(
                        "unknown format '{}', expected one of {}",
                        format,
                        OUTPUT_FORMATS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ApimapConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ApimapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut ApimapConfig, other: &ApimapConfig) {
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.output.format.is_some() {
            base.output.format = other.output.format.clone();
        }
        if other.output.log_level.is_some() {
            base.output.log_level = other.output.log_level.clone();
        }
    }

    /// Apply CLI overrides (highest priority). Ignore patterns accumulate.
    pub fn apply_cli_overrides(config: &mut ApimapConfig, cli: &CliOverrides) {
        config
            .scan
            .extra_ignore
            .extend(cli.extra_ignore.iter().cloned());
        if cli.max_file_size.is_some() {
            config.scan.max_file_size = cli.max_file_size;
        }
        if cli.threads.is_some() {
            config.scan.threads = cli.threads;
        }
        if cli.follow_symlinks.is_some() {
            config.scan.follow_symlinks = cli.follow_symlinks;
        }
        if cli.format.is_some() {
            config.output.format = cli.format.clone();
        }
        if cli.log_level.is_some() {
            config.output.log_level = cli.log_level.clone();
        }
    }
}

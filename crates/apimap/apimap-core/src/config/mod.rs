//! Configuration system for apimap.
//! TOML-based, 3-layer resolution: CLI > project file > defaults.

pub mod apimap_config;
pub mod output_config;
pub mod scan_config;

pub use apimap_config::{ApimapConfig, CliOverrides};
pub use output_config::OutputConfig;
pub use scan_config::ScanConfig;

//! apimap-core: shared foundation for the apimap API discovery scanner.
//!
//! Errors, configuration, tracing setup, constants, and collection aliases.
//! Nothing in here knows how to find an API call; that lives in
//! `apimap-analysis`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

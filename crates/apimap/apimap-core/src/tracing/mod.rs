//! Observability for apimap.
//! `tracing` crate with an `EnvFilter` built from an explicit directive.

pub mod setup;

pub use setup::init_tracing;

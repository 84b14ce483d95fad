//! apimap-analysis: the API discovery scanner.
//!
//! Walks a source tree and builds an inventory of HTTP API usage from three
//! families of evidence:
//!
//! - client call sites (`fetch`, `axios`, data hooks, aliased client instances)
//! - server endpoint definitions (registrations, decorators, file-route conventions)
//! - OpenAPI/Swagger declarations in JSON documents
//!
//! Everything is lexical. There is no AST and no type resolution.

pub mod catalog;
pub mod classify;
pub mod dedup;
pub mod extractors;
pub mod literal;
pub mod record;
pub mod report;
pub mod resolver;
pub mod scan;
pub mod source;
pub mod walker;

pub use catalog::PatternCatalog;
pub use record::{ApiRecord, HttpMethod, Origin};
pub use report::OutputFormat;
pub use scan::{scan, scan_with_config, ScanReport, ScanStats, Scanner};

//! Error handling for apimap.
//! One error enum per subsystem, `thiserror` only.

pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod report_error;
pub mod scan_error;
pub mod spec_document_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::ApimapErrorCode;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use report_error::ReportError;
pub use scan_error::ScanError;
pub use spec_document_error::SpecDocumentError;

//! OpenAPI 3.x / Swagger 2.0 documents (JSON only).
//!
//! A document that fails to parse or lacks the `openapi`/`swagger` key
//! contributes nothing. The failure is logged at debug and never surfaces.

use apimap_core::errors::{ApimapErrorCode, SpecDocumentError};
use serde_json::{Map, Value};

use crate::catalog::labels;
use crate::classify::FileClass;
use crate::record::{ApiRecord, HttpMethod, Origin};
use crate::source::SourceFile;

use super::Extractor;

#[derive(Debug, Default)]
pub struct SpecDocumentExtractor;

impl SpecDocumentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into declaration records.
    pub fn parse(&self, relative: &str, content: &str) -> Result<Vec<ApiRecord>, SpecDocumentError> {
        let value: Value = serde_json::from_str(content).map_err(|e| SpecDocumentError::Malformed {
            path: relative.to_string(),
            message: e.to_string(),
        })?;
        let Value::Object(document) = value else {
            return Err(SpecDocumentError::MissingMarker { path: relative.to_string() });
        };

        let (library, base) = if document.contains_key("openapi") {
            (labels::OPENAPI, servers_base_path(&document))
        } else if document.contains_key("swagger") {
            let base = document
                .get("basePath")
                .and_then(Value::as_str)
                .map(trim_base)
                .unwrap_or_default();
            (labels::SWAGGER, base)
        } else {
            return Err(SpecDocumentError::MissingMarker { path: relative.to_string() });
        };

        let Some(paths) = document.get("paths").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (declared, item) in paths {
            let Some(operations) = item.as_object() else { continue };
            for (key, operation) in operations {
                let Some(method) = HttpMethod::parse(key) else { continue };
                let description = operation
                    .get("summary")
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .or_else(|| operation.get("operationId").and_then(Value::as_str));
                let full_path = format!("{}{}", base, declared);
                if let Some(record) =
                    ApiRecord::new(Origin::SpecDeclaration, method, &full_path, relative, 1, library)
                {
                    records.push(record.with_description(description));
                }
            }
        }
        Ok(records)
    }
}

/// Path component of the first `servers[].url`, without a trailing `/`.
fn servers_base_path(document: &Map<String, Value>) -> String {
    let Some(url) = document
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        .and_then(|server| server.get("url"))
        .and_then(Value::as_str)
    else {
        return String::new();
    };

    let path = match url.find("://") {
        Some(scheme_end) => {
            let after_scheme = &url[scheme_end + 3..];
            after_scheme.find('/').map_or("", |slash| &after_scheme[slash..])
        }
        None if url.starts_with('/') => url,
        None => "",
    };
    trim_base(path)
}

fn trim_base(path: &str) -> String {
    path.trim().trim_end_matches('/').to_string()
}

impl Extractor for SpecDocumentExtractor {
    fn id(&self) -> &'static str {
        "spec-document"
    }

    fn classes(&self) -> &'static [FileClass] {
        &[FileClass::SpecDocument]
    }

    fn extract(&self, file: &SourceFile<'_>) -> Vec<ApiRecord> {
        // package.json, tsconfig.json and friends never mention either key.
        if !(file.content.contains("\"openapi\"") || file.content.contains("\"swagger\"")) {
            return Vec::new();
        }
        match self.parse(file.relative, file.content) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!(error = %e.coded_string(), "spec document skipped");
                Vec::new()
            }
        }
    }
}

//! The inventory record: one discovered call site, endpoint, or declaration.

use serde::{Deserialize, Serialize};

use crate::literal::normalize_path;

/// HTTP methods the scanner recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Parse a method token, case-insensitively.
    pub fn parse(token: &str) -> Option<Self> {
        let method = match token.trim().to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    pub fn all() -> &'static [HttpMethod] {
        &[
            Self::Get, Self::Post, Self::Put, Self::Delete,
            Self::Patch, Self::Head, Self::Options,
        ]
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which extractor family produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Client-side invocation (fetch, axios, hooks, aliased clients).
    ClientCall,
    /// Server-side route handler.
    ServerEndpoint,
    /// Declared in an OpenAPI/Swagger document.
    SpecDeclaration,
}

impl Origin {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClientCall => "client_call",
            Self::ServerEndpoint => "server_endpoint",
            Self::SpecDeclaration => "spec_declaration",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single entry of the API inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRecord {
    pub origin: Origin,
    pub method: HttpMethod,
    /// URL path or path template, `[id]` placeholders rewritten to `{id}`.
    pub path: String,
    /// Path relative to the scan root, `/`-separated.
    pub source_file: String,
    /// 1-based line. Always 1 for spec declarations.
    pub source_line: u32,
    /// Detector or framework name, or an alias label.
    pub library: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Exact-equality key used by deduplication.
pub type DedupKey = (Origin, HttpMethod, String, String, u32);

impl ApiRecord {
    /// Build a record, normalising `raw_path`.
    ///
    /// Returns `None` when the path is empty or not path-like. The
    /// description defaults to `"{library} ({file name})"`.
    pub fn new(
        origin: Origin,
        method: HttpMethod,
        raw_path: &str,
        source_file: &str,
        source_line: u32,
        library: &str,
    ) -> Option<Self> {
        let path = normalize_path(raw_path)?;
        Some(Self {
            origin,
            method,
            path,
            source_file: source_file.to_string(),
            source_line: source_line.max(1),
            library: library.to_string(),
            instance_alias: None,
            description: Some(fallback_description(library, source_file)),
        })
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.instance_alias = Some(alias.to_string());
        self
    }

    /// Replace the description when `description` is non-empty.
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        if let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) {
            self.description = Some(text.to_string());
        }
        self
    }

    pub fn dedup_key(&self) -> DedupKey {
        (
            self.origin,
            self.method,
            self.path.clone(),
            self.source_file.clone(),
            self.source_line,
        )
    }
}

fn fallback_description(library: &str, source_file: &str) -> String {
    let file_name = source_file.rsplit('/').next().unwrap_or(source_file);
    format!("{} ({})", library, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("Delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("OPTIONS"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::parse("trace"), None);
        assert_eq!(HttpMethod::parse(""), None);
    }

    #[test]
    fn test_new_normalises_brackets_and_defaults_description() {
        let record = ApiRecord::new(
            Origin::ServerEndpoint,
            HttpMethod::Get,
            "/api/users/[id]",
            "app/api/users/[id]/route.ts",
            4,
            "nextjs-api",
        )
        .unwrap();
        assert_eq!(record.path, "/api/users/{id}");
        assert_eq!(record.description.as_deref(), Some("nextjs-api (route.ts)"));
    }

    #[test]
    fn test_new_rejects_empty_path() {
        assert!(ApiRecord::new(Origin::ClientCall, HttpMethod::Get, "  ", "a.ts", 1, "fetch").is_none());
    }

    #[test]
    fn test_serializes_method_uppercase_and_skips_missing_alias() {
        let record = ApiRecord::new(Origin::ClientCall, HttpMethod::Post, "/x", "a.ts", 2, "axios").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["origin"], "client_call");
        assert!(json.get("instance_alias").is_none());
    }
}

//! File-route conventions: deriving an endpoint path from where a file lives.

use apimap_core::errors::CatalogError;
use regex::Regex;

use crate::literal::brackets_to_braces;
use crate::record::HttpMethod;

/// How the file at the end of a convention path maps to route segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRule {
    /// Only files with this stem are handlers; the route is the directory.
    NamedHandler(&'static str),
    /// Every file is a handler and its stem is the last segment.
    /// An `index` stem adds nothing.
    StemIsSegment,
}

#[derive(Debug, Clone)]
pub struct RouteConvention {
    pub library: &'static str,
    /// Directory segments that root the convention, e.g. `["app", "api"]`.
    pub anchor: &'static [&'static str],
    /// Prefix that the anchor directory maps to.
    pub mount: &'static str,
    pub file_rule: FileRule,
    pub extensions: &'static [&'static str],
    /// Look at `req.method` comparisons and the default export when the
    /// file exports no method-named handlers.
    pub method_fallback: bool,
}

impl RouteConvention {
    /// Derive the route for a `/`-separated path, which may include the
    /// ancestors of the scan root.
    ///
    /// The last occurrence of the anchor wins, so `src/app/api/...` and
    /// `apps/web/app/api/...` both work. Stems starting with `_` are private
    /// files and never routes.
    pub fn derive_route(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (file, dirs) = segments.split_last()?;
        let (stem, ext) = file.rsplit_once('.')?;
        if !self.extensions.contains(&ext) || stem.starts_with('_') {
            return None;
        }

        let width = self.anchor.len();
        let start = (0..=dirs.len().checked_sub(width)?)
            .rev()
            .find(|&i| dirs[i..i + width] == *self.anchor)?;
        let mut route: Vec<&str> = dirs[start + width..].to_vec();

        match self.file_rule {
            FileRule::NamedHandler(name) => {
                if stem != name {
                    return None;
                }
            }
            FileRule::StemIsSegment => {
                if stem != "index" {
                    route.push(stem);
                }
            }
        }

        let joined = route.join("/");
        let path = match (self.mount.is_empty(), joined.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{}", joined),
            (false, true) => self.mount.to_string(),
            (false, false) => format!("{}/{}", self.mount, joined),
        };
        Some(brackets_to_braces(&path))
    }
}

pub fn builtin_conventions() -> Vec<RouteConvention> {
    const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs"];
    vec![
        RouteConvention {
            library: "nextjs-api",
            anchor: &["app", "api"],
            mount: "/api",
            file_rule: FileRule::NamedHandler("route"),
            extensions: SCRIPT_EXTENSIONS,
            method_fallback: false,
        },
        RouteConvention {
            library: "nextjs-api",
            anchor: &["pages", "api"],
            mount: "/api",
            file_rule: FileRule::StemIsSegment,
            extensions: SCRIPT_EXTENSIONS,
            method_fallback: true,
        },
        RouteConvention {
            library: "sveltekit",
            anchor: &["routes"],
            mount: "",
            file_rule: FileRule::NamedHandler("+server"),
            extensions: &["js", "ts"],
            method_fallback: false,
        },
    ]
}

/// A handler method found in a convention file, with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerHit {
    pub method: HttpMethod,
    pub offset: usize,
}

/// Patterns that find method handlers inside a convention file.
#[derive(Debug, Clone)]
pub struct HandlerPatterns {
    exported_function: Regex,
    exported_const: Regex,
    export_list: Regex,
    export_list_item: Regex,
    method_comparison: Regex,
    method_case: Regex,
    default_export: Regex,
}

const UPPER_VERBS: &str = "GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS";

impl HandlerPatterns {
    pub fn compile() -> Result<Self, CatalogError> {
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| CatalogError::InvalidPattern {
                library: "route-handlers".to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            exported_function: compile(format!(
                r"\bexport\s+(?:async\s+)?function\s*\*?\s*(?P<method>{UPPER_VERBS})\b"
            ))?,
            exported_const: compile(format!(
                r"\bexport\s+(?:const|let|var)\s+(?P<method>{UPPER_VERBS})\s*(?::[^=\n]+)?="
            ))?,
            export_list: compile(r"\bexport\s*\{(?P<list>[^}]*)\}".to_string())?,
            export_list_item: compile(format!(r"(?:^|[\s,])(?:\w+\s+as\s+)?(?P<method>{UPPER_VERBS})\b"))?,
            method_comparison: compile(
                r#"\.method\s*(?:===?|!==?)\s*['"`](?P<method>[A-Za-z]+)['"`]"#.to_string(),
            )?,
            method_case: compile(r#"\bcase\s+['"`](?P<method>[A-Za-z]+)['"`]\s*:"#.to_string())?,
            default_export: compile(r"\bexport\s+default\b".to_string())?,
        })
    }

    /// Method-named exports, one hit per method in source order.
    pub fn exported_handlers(&self, content: &str) -> Vec<HandlerHit> {
        let mut hits = Vec::new();
        for re in [&self.exported_function, &self.exported_const] {
            for caps in re.captures_iter(content) {
                if let (Some(m), Some(whole)) = (caps.name("method"), caps.get(0)) {
                    if let Some(method) = HttpMethod::parse(m.as_str()) {
                        hits.push(HandlerHit { method, offset: whole.start() });
                    }
                }
            }
        }
        for caps in self.export_list.captures_iter(content) {
            let Some(list) = caps.name("list") else { continue };
            for item in self.export_list_item.captures_iter(list.as_str()) {
                if let Some(method) = item.name("method").and_then(|m| HttpMethod::parse(m.as_str())) {
                    hits.push(HandlerHit { method, offset: list.start() });
                }
            }
        }
        finish(hits)
    }

    /// Methods a single default-exported handler branches on. Falls back to
    /// GET at the default export; empty when there is no default export.
    pub fn dispatched_methods(&self, content: &str) -> Vec<HandlerHit> {
        let mut hits = Vec::new();
        for re in [&self.method_comparison, &self.method_case] {
            for caps in re.captures_iter(content) {
                if let (Some(m), Some(whole)) = (caps.name("method"), caps.get(0)) {
                    if let Some(method) = HttpMethod::parse(m.as_str()) {
                        hits.push(HandlerHit { method, offset: whole.start() });
                    }
                }
            }
        }
        let hits = finish(hits);
        if !hits.is_empty() {
            return hits;
        }
        self.default_export
            .find(content)
            .map(|m| vec![HandlerHit { method: HttpMethod::Get, offset: m.start() }])
            .unwrap_or_default()
    }
}

/// Sort by position and keep the first hit per method.
fn finish(mut hits: Vec<HandlerHit>) -> Vec<HandlerHit> {
    hits.sort_by_key(|h| h.offset);
    let mut seen = Vec::with_capacity(hits.len());
    hits.retain(|h| {
        if seen.contains(&h.method) {
            false
        } else {
            seen.push(h.method);
            true
        }
    });
    hits
}

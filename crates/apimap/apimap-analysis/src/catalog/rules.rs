//! Extraction rules: how a matcher turns its captures into `(method, path)`.
//!
//! Each catalog matcher names one rule. Rules read named capture groups
//! only (`method`, `path`, `options`), so a new framework never needs a new
//! branch in shared dispatch code unless its capture shape is new.

use apimap_core::errors::CatalogError;
use apimap_core::types::collections::SmallVec2;
use regex::{Captures, Regex};

use crate::literal::{is_absolute_url, literal_path};
use crate::record::HttpMethod;

/// A `(method, path)` pair pulled out of one match. `path` is unnormalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub method: HttpMethod,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRule {
    /// `method` and `path` groups. A `method` group that did not participate
    /// falls back to the matcher default.
    MethodAndPath,
    /// `path` group only; method is the matcher default.
    PathOnly,
    /// Like `PathOnly`, but the literal must start with `/` or be an absolute
    /// URL. Used where string arguments are often cache keys, not paths.
    PathLikeOnly,
    /// Registration whose path argument may be missing; missing means `/`.
    OptionalPath,
    /// An options object carrying `method:` and, when there is no `path`
    /// group, `url:`. The `options` group marks the object's opening brace.
    OptionsObject,
    /// A `methods=[...]` list in the `options` group; one pair per listed verb.
    MethodList,
}

/// Helper patterns for reading option objects and method lists.
#[derive(Debug, Clone)]
pub struct OptionPatterns {
    method_option: Regex,
    url_option: Regex,
    methods_list: Regex,
    quoted_verb: Regex,
}

impl OptionPatterns {
    pub fn compile() -> Result<Self, CatalogError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| CatalogError::InvalidPattern {
                library: "options".to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            method_option: compile(r#"\bmethod\s*:\s*\[?\s*['"`](?P<method>[A-Za-z]+)['"`]"#)?,
            url_option: compile(r#"\burl\s*:\s*(?P<path>'[^'\n]*'|"[^"\n]*"|`[^`]*`)"#)?,
            methods_list: compile(r"\bmethods\s*=\s*[\[(](?P<list>[^\])]*)[\])]")?,
            quoted_verb: compile(r#"['"](?P<method>[A-Za-z]+)['"]"#)?,
        })
    }

    /// `Some(Ok(m))` for a recognised verb, `Some(Err(()))` for an option
    /// naming a verb outside the vocabulary, `None` when absent.
    fn method_in(&self, body: &str) -> Option<Result<HttpMethod, ()>> {
        let caps = self.method_option.captures(body)?;
        Some(HttpMethod::parse(&caps["method"]).ok_or(()))
    }

    fn url_in(&self, body: &str) -> Option<String> {
        let caps = self.url_option.captures(body)?;
        literal_path(&caps["path"])
    }

    /// Recognised verbs of a `methods=[...]` list in source order, without
    /// repeats. `None` when the body has no list.
    fn listed_methods_in(&self, body: &str) -> Option<Vec<HttpMethod>> {
        let caps = self.methods_list.captures(body)?;
        let mut methods = Vec::new();
        for verb in self.quoted_verb.captures_iter(&caps["list"]) {
            if let Some(method) = HttpMethod::parse(&verb["method"]) {
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
        }
        Some(methods)
    }
}

impl ExtractRule {
    /// Apply the rule to one match. `body` is the text of the `options`
    /// group, already widened to the whole object for [`Self::OptionsObject`].
    pub fn apply(
        &self,
        caps: &Captures<'_>,
        body: Option<&str>,
        default: HttpMethod,
        options: &OptionPatterns,
    ) -> SmallVec2<Extracted> {
        match self {
            Self::MethodList => {
                let Some(path) = captured_literal(caps) else {
                    return SmallVec2::new();
                };
                match options.listed_methods_in(body.unwrap_or("")) {
                    Some(methods) => methods
                        .into_iter()
                        .map(|method| Extracted { method, path: path.clone() })
                        .collect(),
                    None => std::iter::once(Extracted { method: default, path }).collect(),
                }
            }
            _ => self.apply_single(caps, body, default, options).into_iter().collect(),
        }
    }

    fn apply_single(
        &self,
        caps: &Captures<'_>,
        body: Option<&str>,
        default: HttpMethod,
        options: &OptionPatterns,
    ) -> Option<Extracted> {
        match self {
            Self::MethodAndPath => Some(Extracted {
                method: captured_method(caps, default)?,
                path: captured_literal(caps)?,
            }),
            Self::PathOnly => Some(Extracted {
                method: default,
                path: captured_literal(caps)?,
            }),
            Self::PathLikeOnly => {
                let path = captured_literal(caps)?;
                if !(path.starts_with('/') || is_absolute_url(&path)) {
                    return None;
                }
                Some(Extracted { method: default, path })
            }
            Self::OptionalPath => {
                let path = captured_literal(caps)
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| "/".to_string());
                Some(Extracted {
                    method: captured_method(caps, default)?,
                    path,
                })
            }
            Self::OptionsObject => {
                let body = body.unwrap_or("");
                let path = match caps.name("path") {
                    Some(_) => captured_literal(caps)?,
                    None => options.url_in(body)?,
                };
                let method = match options.method_in(body) {
                    Some(parsed) => parsed.ok()?,
                    None => captured_method(caps, default)?,
                };
                Some(Extracted { method, path })
            }
            Self::MethodList => None,
        }
    }
}

fn captured_method(caps: &Captures<'_>, default: HttpMethod) -> Option<HttpMethod> {
    match caps.name("method") {
        Some(m) => HttpMethod::parse(m.as_str()),
        None => Some(default),
    }
}

fn captured_literal(caps: &Captures<'_>) -> Option<String> {
    caps.name("path").and_then(|m| literal_path(m.as_str()))
}

//! Pattern catalog: the registry of detectors the extractors consult.
//!
//! Every framework and client library the scanner knows is one
//! [`CatalogEntry`]. Extractors iterate entries by [`Family`] and never name
//! a library themselves, so adding a framework is a change to
//! [`builtin::entry_specs`] only.

pub mod aliases;
pub mod builtin;
pub mod conventions;
pub mod rules;

pub use aliases::AliasVocabulary;
pub use conventions::{FileRule, HandlerHit, HandlerPatterns, RouteConvention};
pub use rules::{ExtractRule, Extracted, OptionPatterns};

use apimap_core::errors::CatalogError;
use regex::Regex;

use crate::literal::balanced_object;
use crate::record::HttpMethod;

/// Library labels that are not catalog entries.
pub mod labels {
    /// A client bound by a local declaration (`const api = axios.create()`).
    pub const CUSTOM_INSTANCE: &str = "custom-instance";
    /// A commonly named client with no declaration in the file.
    pub const HTTP_CLIENT: &str = "http-client";
    pub const OPENAPI: &str = "openapi";
    pub const SWAGGER: &str = "swagger";
}

/// Which extractor family consumes an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Client,
    Server,
}

/// Uncompiled matcher declaration.
#[derive(Debug, Clone)]
pub struct MatcherSpec {
    pub pattern: String,
    pub rule: ExtractRule,
    pub default_method: HttpMethod,
}

/// Uncompiled catalog entry.
#[derive(Debug, Clone)]
pub struct EntrySpec {
    pub library: &'static str,
    pub family: Family,
    /// Substring that must appear in the file for the entry to run.
    pub marker: Option<&'static str>,
    pub matchers: Vec<MatcherSpec>,
}

/// A compiled matcher.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    rule: ExtractRule,
    default_method: HttpMethod,
}

impl Matcher {
    fn compile(library: &str, spec: MatcherSpec) -> Result<Self, CatalogError> {
        let regex = Regex::new(&spec.pattern).map_err(|e| CatalogError::InvalidPattern {
            library: library.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            regex,
            rule: spec.rule,
            default_method: spec.default_method,
        })
    }

    /// Every extraction in `text`, paired with the byte offset the record's
    /// line is computed from: the `anchor` group when present, otherwise the
    /// start of the match. An `options` group that captured only `{` is
    /// widened to the whole brace-balanced object.
    pub fn find_all(&self, text: &str, options: &OptionPatterns) -> Vec<(usize, Extracted)> {
        self.regex
            .captures_iter(text)
            .flat_map(|caps| {
                let offset = caps
                    .name("anchor")
                    .or_else(|| caps.get(0))
                    .map_or(0, |m| m.start());
                let body = caps.name("options").map(|m| {
                    if m.as_str() == "{" {
                        balanced_object(text, m.start())
                    } else {
                        m.as_str()
                    }
                });
                self.rule
                    .apply(&caps, body, self.default_method, options)
                    .into_iter()
                    .map(move |extracted| (offset, extracted))
            })
            .collect()
    }

    pub fn rule(&self) -> ExtractRule {
        self.rule
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub library: &'static str,
    pub family: Family,
    marker: Option<&'static str>,
    matchers: Vec<Matcher>,
}

impl CatalogEntry {
    /// Cheap pre-filter: an entry whose marker is absent never matches.
    pub fn applies_to(&self, content: &str) -> bool {
        self.marker.map_or(true, |marker| content.contains(marker))
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }
}

/// The immutable detector registry shared by all extractors.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    entries: Vec<CatalogEntry>,
    options: OptionPatterns,
    aliases: AliasVocabulary,
    conventions: Vec<RouteConvention>,
    handlers: HandlerPatterns,
}

impl PatternCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_specs(builtin::entry_specs(), conventions::builtin_conventions())
    }

    pub fn from_specs(
        specs: Vec<EntrySpec>,
        conventions: Vec<RouteConvention>,
    ) -> Result<Self, CatalogError> {
        let entries = specs
            .into_iter()
            .map(|spec| {
                let matchers = spec
                    .matchers
                    .into_iter()
                    .map(|m| Matcher::compile(spec.library, m))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, CatalogError>(CatalogEntry {
                    library: spec.library,
                    family: spec.family,
                    marker: spec.marker,
                    matchers,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(entries = entries.len(), "pattern catalog compiled");

        Ok(Self {
            entries,
            options: OptionPatterns::compile()?,
            aliases: AliasVocabulary::builtin()?,
            conventions,
            handlers: HandlerPatterns::compile()?,
        })
    }

    pub fn entries(&self, family: Family) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.family == family)
    }

    pub fn libraries(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.library).collect()
    }

    pub fn options(&self) -> &OptionPatterns {
        &self.options
    }

    pub fn aliases(&self) -> &AliasVocabulary {
        &self.aliases
    }

    pub fn conventions(&self) -> &[RouteConvention] {
        &self.conventions
    }

    pub fn handlers(&self) -> &HandlerPatterns {
        &self.handlers
    }
}

//! Client-instance resolution: which local names are bound to an HTTP client.
//!
//! Purely lexical. A name counts as a client when the file declares it from a
//! creatable library (`axios.create`), constructs it from a class whose name
//! looks like a client, assigns it from a known factory, or receives it by
//! constructor injection. Well-known names such as `api` or `http` are
//! accepted without a declaration at lower strength.

use apimap_core::types::collections::FxHashMap;

use crate::catalog::{labels, AliasVocabulary, Family, PatternCatalog};

/// How sure the resolver is that a name is a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AliasStrength {
    /// Only the name suggests it.
    Common,
    /// Bound by a declaration in this file.
    Declared,
}

impl AliasStrength {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Declared => labels::CUSTOM_INSTANCE,
            Self::Common => labels::HTTP_CLIENT,
        }
    }
}

/// Aliases resolved for one file.
#[derive(Debug)]
pub struct ClientAliases<'c> {
    declared: FxHashMap<String, usize>,
    vocabulary: &'c AliasVocabulary,
    named_libraries: Vec<&'static str>,
}

impl<'c> ClientAliases<'c> {
    /// Classify `name` at a call site. `None` means the call is not attributed
    /// to an alias (unknown name, noise identifier, or a library the catalog
    /// already covers by name).
    pub fn lookup(&self, name: &str) -> Option<AliasStrength> {
        if !self.is_candidate(name) {
            return None;
        }
        if self.declared.contains_key(name) {
            Some(AliasStrength::Declared)
        } else if self.vocabulary.is_common(name) {
            Some(AliasStrength::Common)
        } else {
            None
        }
    }

    /// Byte offset of the declaration that bound `name`, if any.
    pub fn declared_at(&self, name: &str) -> Option<usize> {
        self.declared.get(name).copied()
    }

    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declared.keys().map(String::as_str)
    }

    fn is_candidate(&self, name: &str) -> bool {
        !self.vocabulary.is_noise(name) && !self.named_libraries.contains(&name)
    }
}

pub struct ClientResolver<'c> {
    vocabulary: &'c AliasVocabulary,
    named_libraries: Vec<&'static str>,
}

impl<'c> ClientResolver<'c> {
    pub fn new(catalog: &'c PatternCatalog) -> Self {
        Self {
            vocabulary: catalog.aliases(),
            named_libraries: catalog.entries(Family::Client).map(|e| e.library).collect(),
        }
    }

    pub fn resolve(&self, content: &str) -> ClientAliases<'c> {
        let vocab = self.vocabulary;
        let mut declared = FxHashMap::default();
        let mut bind = |name: &str, offset: usize| {
            declared.entry(name.to_string()).or_insert(offset);
        };

        for caps in vocab.create_pattern.captures_iter(content) {
            if vocab.is_creatable(&caps["lib"]) {
                bind(&caps["name"], caps.get(0).map_or(0, |m| m.start()));
            }
        }
        for caps in vocab.construct_pattern.captures_iter(content) {
            if vocab.is_client_class(&caps["class"]) {
                bind(&caps["name"], caps.get(0).map_or(0, |m| m.start()));
            }
        }
        for caps in vocab.factory_pattern.captures_iter(content) {
            if vocab.is_creator_function(&caps["factory"]) {
                bind(&caps["name"], caps.get(0).map_or(0, |m| m.start()));
            }
        }
        for caps in vocab.inject_pattern.captures_iter(content) {
            if vocab.is_client_class(&caps["class"]) {
                bind(&caps["name"], caps.get(0).map_or(0, |m| m.start()));
            }
        }

        declared.retain(|name: &String, _| {
            !vocab.is_noise(name) && !self.named_libraries.contains(&name.as_str())
        });
        if !declared.is_empty() {
            tracing::trace!(aliases = ?declared.keys().collect::<Vec<_>>(), "client aliases resolved");
        }

        ClientAliases {
            declared,
            vocabulary: vocab,
            named_libraries: self.named_libraries.clone(),
        }
    }
}

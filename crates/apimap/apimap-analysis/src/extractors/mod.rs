//! Extractors: turn one file's text into inventory records.
//!
//! Each extractor declares the file classes it handles and is registered in
//! the [`ExtractorRegistry`], which maps a file's classes to the extractors
//! that run on it.

pub mod client;
pub mod file_routes;
pub mod server;
pub mod spec_document;

use std::sync::Arc;

use apimap_core::types::collections::{BTreeMap, FxHashSet};

use crate::catalog::PatternCatalog;
use crate::classify::FileClass;
use crate::record::ApiRecord;
use crate::source::SourceFile;

pub use client::ClientCallExtractor;
pub use file_routes::FileRouteExtractor;
pub use server::ServerEndpointExtractor;
pub use spec_document::SpecDocumentExtractor;

/// A record producer for one kind of source.
///
/// Implementations are pure functions of the file: no state carried between
/// files, so the registry can be shared across worker threads.
pub trait Extractor: Send + Sync {
    fn id(&self) -> &'static str;

    /// File classes this extractor runs on.
    fn classes(&self) -> &'static [FileClass];

    fn extract(&self, file: &SourceFile<'_>) -> Vec<ApiRecord>;
}

/// Class → extractors dispatch table.
pub struct ExtractorRegistry {
    by_class: BTreeMap<FileClass, Vec<Arc<dyn Extractor>>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self { by_class: BTreeMap::new() }
    }

    /// The built-in extractor set over `catalog`.
    pub fn with_defaults(catalog: Arc<PatternCatalog>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SpecDocumentExtractor::new()));
        registry.register(Arc::new(FileRouteExtractor::new(Arc::clone(&catalog))));
        registry.register(Arc::new(ServerEndpointExtractor::new(Arc::clone(&catalog))));
        registry.register(Arc::new(ClientCallExtractor::new(catalog)));
        registry
    }

    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        for class in extractor.classes() {
            self.by_class
                .entry(*class)
                .or_default()
                .push(Arc::clone(&extractor));
        }
    }

    /// Run every extractor registered for any of `classes`, each at most once,
    /// in class order then registration order.
    pub fn extract(&self, file: &SourceFile<'_>, classes: &[FileClass]) -> Vec<ApiRecord> {
        let mut ran: FxHashSet<&'static str> = FxHashSet::default();
        let mut records = Vec::new();
        for class in classes {
            let Some(extractors) = self.by_class.get(class) else { continue };
            for extractor in extractors {
                if ran.insert(extractor.id()) {
                    records.extend(extractor.extract(file));
                }
            }
        }
        records
    }

    pub fn extractor_ids(&self, class: FileClass) -> Vec<&'static str> {
        self.by_class
            .get(&class)
            .map(|list| list.iter().map(|e| e.id()).collect())
            .unwrap_or_default()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

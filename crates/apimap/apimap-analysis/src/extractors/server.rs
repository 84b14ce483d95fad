//! Registration- and decorator-based endpoint extraction.

use std::sync::Arc;

use crate::catalog::{Family, PatternCatalog};
use crate::classify::FileClass;
use crate::record::{ApiRecord, Origin};
use crate::source::SourceFile;

use super::Extractor;

pub struct ServerEndpointExtractor {
    catalog: Arc<PatternCatalog>,
}

impl ServerEndpointExtractor {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl Extractor for ServerEndpointExtractor {
    fn id(&self) -> &'static str {
        "server-endpoints"
    }

    fn classes(&self) -> &'static [FileClass] {
        &[FileClass::Backend]
    }

    fn extract(&self, file: &SourceFile<'_>) -> Vec<ApiRecord> {
        let mut records = Vec::new();
        for entry in self.catalog.entries(Family::Server) {
            if !entry.applies_to(file.content) {
                continue;
            }
            for matcher in entry.matchers() {
                for (offset, hit) in matcher.find_all(file.content, self.catalog.options()) {
                    records.extend(ApiRecord::new(
                        Origin::ServerEndpoint,
                        hit.method,
                        &hit.path,
                        file.relative,
                        file.line_of(offset),
                        entry.library,
                    ));
                }
            }
        }
        records
    }
}

//! Scan orchestration: walk, read and extract in parallel, merge, dedup.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use apimap_core::config::ApimapConfig;
use apimap_core::errors::{ApimapErrorCode, CatalogError, PipelineResult, ScanError};
use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::PatternCatalog;
use crate::classify::Classifier;
use crate::dedup::dedup_records;
use crate::extractors::ExtractorRegistry;
use crate::record::ApiRecord;
use crate::report::{self, OutputFormat};
use crate::source::SourceFile;
use crate::walker::{self, Candidate, Walker};

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Regular files seen during discovery (after pruning).
    pub files_visited: usize,
    /// Files read and handed to extractors.
    pub files_scanned: usize,
    /// Files skipped for extension, ignore pattern, or size.
    pub files_skipped: usize,
    /// Files that could not be read or decoded.
    pub read_errors: usize,
    pub dirs_pruned: usize,
    pub duplicates_removed: usize,
    pub elapsed_ms: u64,
}

/// The deduplicated inventory for one root.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub records: Vec<ApiRecord>,
    pub stats: ScanStats,
}

enum FileOutcome {
    Scanned(Vec<ApiRecord>),
    Skipped,
    Failed,
}

/// Scanner bound to one resolved configuration.
pub struct Scanner {
    config: ApimapConfig,
    classifier: Classifier,
    registry: ExtractorRegistry,
}

impl Scanner {
    pub fn new(config: &ApimapConfig) -> Result<Self, CatalogError> {
        Ok(Self::with_catalog(config, PatternCatalog::builtin()?))
    }

    pub fn with_catalog(config: &ApimapConfig, catalog: PatternCatalog) -> Self {
        Self {
            config: config.clone(),
            classifier: Classifier::default(),
            registry: ExtractorRegistry::with_defaults(Arc::new(catalog)),
        }
    }

    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        walker::validate_root(root)?;

        let walker = Walker::new(root, &self.config.scan, self.classifier.clone());
        let (candidates, walk_stats) = walker.discover();
        tracing::debug!(candidates = candidates.len(), "discovery finished");

        let outcomes = self.extract_all(&walker, &candidates);

        let mut stats = ScanStats {
            files_visited: walk_stats.files_visited,
            files_skipped: walk_stats.files_skipped,
            dirs_pruned: walk_stats.dirs_pruned,
            ..ScanStats::default()
        };
        let mut records = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Scanned(found) => {
                    stats.files_scanned += 1;
                    records.extend(found);
                }
                FileOutcome::Skipped => stats.files_skipped += 1,
                FileOutcome::Failed => stats.read_errors += 1,
            }
        }

        stats.duplicates_removed = dedup_records(&mut records);
        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            root = %root.display(),
            files_scanned = stats.files_scanned,
            records = records.len(),
            duplicates_removed = stats.duplicates_removed,
            elapsed_ms = stats.elapsed_ms,
            "scan complete"
        );

        Ok(ScanReport {
            root: root.to_path_buf(),
            records,
            stats,
        })
    }

    /// Read and extract every candidate, preserving discovery order.
    fn extract_all(&self, walker: &Walker, candidates: &[Candidate]) -> Vec<FileOutcome> {
        let run = || {
            candidates
                .par_iter()
                .map(|candidate| self.process(walker, candidate))
                .collect::<Vec<_>>()
        };

        match self.config.scan.effective_threads() {
            0 => run(),
            threads => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    tracing::warn!(threads, error = %e, "thread pool unavailable, using default");
                    run()
                }
            },
        }
    }

    fn process(&self, walker: &Walker, candidate: &Candidate) -> FileOutcome {
        let content = match walker.read(candidate) {
            Ok(content) => content,
            Err(e @ ScanError::FileTooLarge { .. }) => {
                tracing::debug!(error = %e.coded_string(), "file skipped");
                return FileOutcome::Skipped;
            }
            Err(e) => {
                tracing::debug!(error = %e.coded_string(), "file unreadable");
                return FileOutcome::Failed;
            }
        };
        let file = SourceFile::new(&candidate.path, &candidate.relative, &content);
        FileOutcome::Scanned(self.registry.extract(&file, &candidate.classes))
    }
}

/// Scan `project_path` and render the inventory.
///
/// Configuration comes from `apimap.toml` at the root when present,
/// otherwise from defaults.
pub fn scan(project_path: &Path, format: OutputFormat) -> PipelineResult<String> {
    let config = ApimapConfig::load(project_path, None, None)?;
    scan_with_config(project_path, format, &config)
}

/// Like [`scan`], with an already-resolved configuration.
pub fn scan_with_config(
    project_path: &Path,
    format: OutputFormat,
    config: &ApimapConfig,
) -> PipelineResult<String> {
    let scanner = Scanner::new(config)?;
    let report = scanner.scan(project_path)?;
    Ok(report::render(&report, format)?)
}

//! Directory walker: deterministic top-down discovery, then per-file reads.
//!
//! Discovery is single-threaded and sorted by name at every level, so the
//! candidate list (and therefore the record order) is stable across runs.
//! Reading is a separate step the scanner runs in parallel.

pub mod prune;

use std::fs;
use std::path::{Path, PathBuf};

use apimap_core::config::ScanConfig;
use apimap_core::errors::ScanError;
use apimap_core::types::collections::{FxHashSet, SmallVec2};

use crate::classify::{Classifier, FileClass};

pub use prune::PrunePolicy;

/// A file that at least one extractor wants to see.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Full path under the canonicalised scan root.
    pub path: PathBuf,
    /// Relative to the scan root, `/`-separated.
    pub relative: String,
    pub classes: SmallVec2<FileClass>,
}

/// Discovery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files_visited: usize,
    pub files_skipped: usize,
    pub dirs_pruned: usize,
}

pub struct Walker {
    root: PathBuf,
    prune: PrunePolicy,
    classifier: Classifier,
    max_file_size: u64,
    follow_symlinks: bool,
}

impl Walker {
    pub fn new(root: &Path, config: &ScanConfig, classifier: Classifier) -> Self {
        Self {
            root: fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()),
            prune: PrunePolicy::new(root, &config.extra_ignore),
            classifier,
            max_file_size: config.effective_max_file_size(),
            follow_symlinks: config.effective_follow_symlinks(),
        }
    }

    /// Walk the tree and return eligible files in discovery order.
    pub fn discover(&self) -> (Vec<Candidate>, WalkStats) {
        let mut candidates = Vec::new();
        let mut stats = WalkStats::default();
        let mut visited = FxHashSet::default();
        if let Ok(canonical) = fs::canonicalize(&self.root) {
            visited.insert(canonical);
        }
        self.walk_dir(&self.root, &mut candidates, &mut stats, &mut visited);
        (candidates, stats)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        candidates: &mut Vec<Candidate>,
        stats: &mut WalkStats,
        visited: &mut FxHashSet<PathBuf>,
    ) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "unreadable directory");
                return;
            }
        };
        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else { continue };
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();

            let (is_dir, is_file) = if file_type.is_symlink() {
                if !self.follow_symlinks {
                    tracing::trace!(path = %relative.display(), "symlink skipped");
                    continue;
                }
                match fs::metadata(&path) {
                    Ok(meta) => (meta.is_dir(), meta.is_file()),
                    Err(_) => continue,
                }
            } else {
                (file_type.is_dir(), file_type.is_file())
            };

            if is_dir {
                if self.prune.prunes_dir(&name, &relative) {
                    tracing::debug!(dir = %relative.display(), "pruned");
                    stats.dirs_pruned += 1;
                    continue;
                }
                if self.follow_symlinks {
                    let Ok(canonical) = fs::canonicalize(&path) else { continue };
                    if !visited.insert(canonical) {
                        tracing::debug!(dir = %relative.display(), "symlink cycle skipped");
                        continue;
                    }
                }
                self.walk_dir(&path, candidates, stats, visited);
            } else if is_file {
                stats.files_visited += 1;
                let relative = to_slash(&relative);
                let classes = self.classifier.classify(&name);
                if classes.is_empty() || self.prune.ignores_file(Path::new(&relative)) {
                    tracing::trace!(file = %relative, "skipped");
                    stats.files_skipped += 1;
                    continue;
                }
                candidates.push(Candidate { path, relative, classes });
            }
        }
    }

    /// Read a candidate as UTF-8 text, enforcing the size limit.
    pub fn read(&self, candidate: &Candidate) -> Result<String, ScanError> {
        let io_error = |source| ScanError::Io { path: candidate.path.clone(), source };
        let size = fs::metadata(&candidate.path).map_err(io_error)?.len();
        if size > self.max_file_size {
            return Err(ScanError::FileTooLarge {
                path: candidate.path.clone(),
                size,
                max: self.max_file_size,
            });
        }
        let bytes = fs::read(&candidate.path).map_err(io_error)?;
        String::from_utf8(bytes).map_err(|_| ScanError::UnsupportedEncoding {
            path: candidate.path.clone(),
        })
    }
}

/// Check that the scan root exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::RootNotDirectory { path: root.to_path_buf() }),
        Err(_) => Err(ScanError::RootNotFound { path: root.to_path_buf() }),
    }
}

/// `path` joined with `/` whatever the platform separator.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

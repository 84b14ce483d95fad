//! Directory pruning and extra ignore patterns.

use std::path::Path;

use apimap_core::constants::DEFAULT_PRUNED_DIRS;
use apimap_core::types::collections::FxHashSet;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Decides which directories are never entered and which files are ignored.
///
/// Built once per scan from the fixed pruned set plus the configured extra
/// patterns, then only read.
#[derive(Debug)]
pub struct PrunePolicy {
    names: FxHashSet<String>,
    extra: Option<Gitignore>,
}

impl PrunePolicy {
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        Self::with_names(root, DEFAULT_PRUNED_DIRS, extra_patterns)
    }

    pub fn with_names(root: &Path, names: &[&str], extra_patterns: &[String]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            extra: build_extra(root, extra_patterns),
        }
    }

    /// Hidden directories, the fixed set, and extra-pattern matches.
    pub fn prunes_dir(&self, name: &str, relative: &Path) -> bool {
        name.starts_with('.')
            || self.names.contains(name)
            || self.extra_matches(relative, true)
    }

    pub fn ignores_file(&self, relative: &Path) -> bool {
        self.extra_matches(relative, false)
    }

    fn extra_matches(&self, relative: &Path, is_dir: bool) -> bool {
        self.extra
            .as_ref()
            .is_some_and(|gi| gi.matched(relative, is_dir).is_ignore())
    }
}

fn build_extra(root: &Path, patterns: &[String]) -> Option<Gitignore> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        if let Err(e) = builder.add_line(None, pattern) {
            tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid ignore pattern");
        }
    }
    match builder.build() {
        Ok(gi) => Some(gi),
        Err(e) => {
            tracing::warn!(error = %e, "extra ignore patterns unusable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_and_hidden_dirs_pruned() {
        let policy = PrunePolicy::new(Path::new("/project"), &[]);
        assert!(policy.prunes_dir("node_modules", Path::new("web/node_modules")));
        assert!(policy.prunes_dir(".next", Path::new(".next")));
        assert!(policy.prunes_dir("dist", Path::new("dist")));
        assert!(!policy.prunes_dir("src", Path::new("src")));
        assert!(!policy.prunes_dir("api", Path::new("app/api")));
    }

    #[test]
    fn test_extra_patterns() {
        let policy = PrunePolicy::new(
            Path::new("/project"),
            &["generated/".to_string(), "*.spec.ts".to_string()],
        );
        assert!(policy.prunes_dir("generated", Path::new("src/generated")));
        assert!(policy.ignores_file(Path::new("src/users.spec.ts")));
        assert!(!policy.ignores_file(Path::new("src/users.ts")));
    }
}

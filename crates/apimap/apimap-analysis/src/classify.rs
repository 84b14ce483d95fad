//! File classification by extension.

use apimap_core::types::collections::SmallVec2;

/// Extractor families a file can be routed to. A file may have several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileClass {
    Frontend,
    Backend,
    SpecDocument,
}

impl FileClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::SpecDocument => "spec_document",
        }
    }
}

const FRONTEND_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte"];
const BACKEND_EXTENSIONS: &[&str] = &["js", "ts", "mjs", "cjs", "py", "java", "kt"];
const SPEC_EXTENSIONS: &[&str] = &["json"];

/// Extension table mapping files to [`FileClass`]es.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Vec<(FileClass, Vec<String>)>,
}

impl Default for Classifier {
    fn default() -> Self {
        let owned = |exts: &[&str]| exts.iter().map(|e| e.to_string()).collect();
        Self {
            table: vec![
                (FileClass::Frontend, owned(FRONTEND_EXTENSIONS)),
                (FileClass::Backend, owned(BACKEND_EXTENSIONS)),
                (FileClass::SpecDocument, owned(SPEC_EXTENSIONS)),
            ],
        }
    }
}

impl Classifier {
    /// Classes for a file name or path. Declaration files (`*.d.ts`) carry no
    /// calls and are ignored.
    pub fn classify(&self, file_name: &str) -> SmallVec2<FileClass> {
        let mut classes = SmallVec2::new();
        if file_name.ends_with(".d.ts") {
            return classes;
        }
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return classes;
        };
        let ext = ext.to_ascii_lowercase();
        for (class, extensions) in &self.table {
            if extensions.iter().any(|e| *e == ext) {
                classes.push(*class);
            }
        }
        classes
    }

    /// Whether any extractor would look at this file.
    pub fn is_eligible(&self, file_name: &str) -> bool {
        !self.classify(file_name).is_empty()
    }
}

//! A file handed to the extractors: its path, text, and a line index.

use std::path::Path;

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let newlines = content
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self { newlines }
    }

    /// Number of newlines before `offset`, plus one.
    pub fn line_of(&self, offset: usize) -> u32 {
        (self.newlines.partition_point(|&nl| nl < offset) + 1) as u32
    }
}

/// One file's worth of input for extraction.
pub struct SourceFile<'a> {
    /// Path on disk, including the ancestors of the scan root.
    pub path: &'a Path,
    /// Path relative to the scan root with `/` separators.
    pub relative: &'a str,
    pub content: &'a str,
    lines: LineIndex,
}

impl<'a> SourceFile<'a> {
    pub fn new(path: &'a Path, relative: &'a str, content: &'a str) -> Self {
        Self {
            path,
            relative,
            content,
            lines: LineIndex::new(content),
        }
    }

    pub fn line_of(&self, offset: usize) -> u32 {
        self.lines.line_of(offset)
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(self.relative)
    }
}

//! The validated unit of work: one file plus its ordered line ranges.
//!
//! Content is loaded lazily and cached write-once: the first access
//! reads the file, resolves end-of-file sentinels, extracts the spans
//! in range-list order, and strips a single trailing newline. Later
//! accesses return the cache unconditionally, even if the file changed
//! on disk. Overlapping or out-of-order ranges are re-emitted verbatim,
//! so duplicate lines can appear in the output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::NanodocError;
use crate::core::range::{self, LineRange};
use crate::infra::io::read_file_smart;
use crate::infra::lines::NewlineIndex;

#[derive(Debug, Clone)]
pub struct ContentItem {
    /// The argument this item came from, selector included.
    pub original_arg: String,
    /// Path to the underlying file.
    pub path: PathBuf,
    /// Ranges to extract, in input order.
    pub ranges: Vec<LineRange>,
    /// Write-once content cache.
    content: Option<String>,
    /// Line count of the underlying file, known after first read.
    line_count: Option<usize>,
    /// Synthetic item whose content was supplied up front (mixed bundles).
    inline: bool,
}

impl ContentItem {
    pub fn new(original_arg: impl Into<String>, path: impl Into<PathBuf>, ranges: Vec<LineRange>) -> Self {
        Self {
            original_arg: original_arg.into(),
            path: path.into(),
            ranges,
            content: None,
            line_count: None,
            inline: false,
        }
    }

    /// Parse an argument like `notes.txt` or `notes.txt:L5-10,L20` into
    /// an item. A missing selector means the whole file.
    pub fn from_arg(arg: &str) -> Result<Self, NanodocError> {
        let (path, selector) = range::split_line_reference(arg);
        let ranges = match selector {
            Some(selector) => range::parse_selector(selector)?,
            None => vec![LineRange::whole_file()],
        };
        Ok(Self::new(arg, path, ranges))
    }

    /// Item with pre-supplied content. Used for the synthetic document a
    /// mixed-content bundle produces; `path` is the bundle file itself,
    /// so headers and the TOC show the bundle's name.
    pub fn from_inline(
        original_arg: impl Into<String>,
        path: impl Into<PathBuf>,
        text: String,
    ) -> Self {
        let line_count = text.lines().count();
        Self {
            original_arg: original_arg.into(),
            path: path.into(),
            ranges: vec![LineRange::whole_file()],
            content: Some(text),
            line_count: Some(line_count),
            inline: true,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Path rendered for headers and diagnostics.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Selector annotation for TOC entries, `None` for whole files.
    /// Example: `L1, L5-10`.
    pub fn selector_annotation(&self) -> Option<String> {
        if self.ranges.iter().all(LineRange::is_whole_file) {
            return None;
        }
        Some(
            self.ranges
                .iter()
                .map(LineRange::to_selector)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Manifest line for bundle export: path plus canonical selector.
    pub fn manifest_entry(&self) -> String {
        if self.ranges.iter().all(LineRange::is_whole_file) {
            self.display_path()
        } else {
            format!("{}:{}", self.display_path(), range::ranges_to_selector(&self.ranges))
        }
    }

    /// Check that the file exists, is readable, is not a directory, and
    /// that every range fits within its actual line count.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `PermissionDenied`, `IsADirectory`, or
    /// `RangeOutOfBounds` naming the offending selector and the file's
    /// actual line count.
    pub fn validate(&mut self) -> Result<(), NanodocError> {
        if self.inline {
            return Ok(());
        }

        debug!(path = %self.path.display(), "validating content item");

        let metadata =
            std::fs::metadata(&self.path).map_err(|e| NanodocError::from_io(e, &self.path))?;
        if metadata.is_dir() {
            return Err(NanodocError::IsADirectory(self.path.clone()));
        }

        let file = read_file_smart(&self.path).map_err(|e| NanodocError::from_io(e, &self.path))?;
        let index = NewlineIndex::build(file.as_bytes());
        let line_count = index.line_count();
        self.line_count = Some(line_count);

        for range in &self.ranges {
            let (start, end) = range.normalize(line_count);
            if start > end || end > line_count {
                return Err(NanodocError::RangeOutOfBounds {
                    selector: range.to_selector(),
                    line_count,
                });
            }
        }

        Ok(())
    }

    /// Selected content, loading and caching it on first access.
    /// The cache is never invalidated: a file modified after the first
    /// read keeps serving the stale content.
    pub fn content(&mut self) -> Result<&str, NanodocError> {
        if self.content.is_none() {
            let loaded = self.load()?;
            self.content = Some(loaded);
        }
        Ok(self.content.as_deref().unwrap_or_default())
    }

    /// Number of lines this item renders as.
    pub fn rendered_line_count(&mut self) -> Result<usize, NanodocError> {
        Ok(self.content()?.lines().count())
    }

    /// Original 1-based file line numbers of the selected lines, in
    /// emission order. Inline items number sequentially from 1.
    pub fn line_numbers(&mut self) -> Result<Vec<usize>, NanodocError> {
        if self.inline {
            let count = self.content()?.lines().count();
            return Ok((1..=count).collect());
        }

        // Loading the content fixes the line count used for sentinels
        self.content()?;
        let line_count = self.line_count.unwrap_or_default();

        let mut numbers = Vec::new();
        for range in &self.ranges {
            let (start, end) = range.normalize(line_count);
            numbers.extend(start..=end);
        }
        Ok(numbers)
    }

    fn load(&mut self) -> Result<String, NanodocError> {
        debug!(path = %self.path.display(), ranges = ?self.ranges, "loading content");

        let file = read_file_smart(&self.path).map_err(|e| NanodocError::from_io(e, &self.path))?;
        let bytes = file.as_bytes();
        let text = file.as_str().map_err(|e| NanodocError::from_io(e, &self.path))?;
        let index = NewlineIndex::build(bytes);
        let line_count = index.line_count();
        self.line_count = Some(line_count);

        let mut spans = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            let (start, end) = range.normalize(line_count);
            let (lo, hi) =
                index
                    .span(start, end, bytes)
                    .ok_or_else(|| NanodocError::RangeOutOfBounds {
                        selector: range.to_selector(),
                        line_count,
                    })?;
            spans.push(&text[lo..hi]);
        }

        Ok(spans.join("\n"))
    }
}

/// Sort key for the final render order: stem first, then extension
/// priority so `.txt` lands before `.md` before anything else.
pub fn sort_key(path: &Path) -> (String, u8) {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let priority = match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => 0,
        Some("md") => 1,
        _ => 2,
    };
    (stem, priority)
}

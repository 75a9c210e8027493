//! Bundle manifests as a serialization unit.
//!
//! [`Bundle`] is the save/load seam used by external tooling that
//! gathers file selections (interactive pickers, scripts). Assembly
//! itself never goes through this type; the resolver expands manifest
//! files directly.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::NanodocError;
use crate::core::item::ContentItem;
use crate::core::resolve::FileReference;

/// Fixed banner written at the top of every exported manifest.
const BANNER: [&str; 3] = [
    "# nanodoc bundle file",
    "# This file contains a list of files to be bundled by nanodoc",
    "# Each line represents a file path, optionally with line references",
];

/// A saved or loadable manifest: the file it lives in plus the items
/// it lists, in order.
#[derive(Debug)]
pub struct Bundle {
    pub path: PathBuf,
    pub items: Vec<ContentItem>,
}

impl Bundle {
    pub fn new(path: impl Into<PathBuf>, items: Vec<ContentItem>) -> Self {
        Self { path: path.into(), items }
    }

    /// Render the canonical manifest text: banner, blank line, one
    /// entry per item. No trailing newline.
    pub fn to_manifest(&self) -> String {
        let mut lines: Vec<String> = BANNER.iter().map(|line| line.to_string()).collect();
        lines.push(String::new());
        lines.extend(self.items.iter().map(ContentItem::manifest_entry));
        lines.join("\n")
    }

    /// Write the manifest to its path.
    pub fn save(&self) -> Result<(), NanodocError> {
        if self.items.is_empty() {
            return Err(NanodocError::EmptyBundle(self.path.clone()));
        }
        debug!(path = %self.path.display(), items = self.items.len(), "saving bundle");
        std::fs::write(&self.path, self.to_manifest())
            .map_err(|e| NanodocError::from_io(e, &self.path))?;
        Ok(())
    }

    /// Read a manifest back into items. Comment and blank lines are
    /// dropped; each remaining line is parsed as a file reference.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NanodocError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => NanodocError::BundleNotFound(path.to_path_buf()),
            _ => NanodocError::from_io(e, path),
        })?;

        let items = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| Ok(FileReference::parse(line)?.into_item()))
            .collect::<Result<Vec<_>, NanodocError>>()?;

        if items.is_empty() {
            return Err(NanodocError::EmptyBundle(path.to_path_buf()));
        }

        Ok(Self::new(path, items))
    }
}

//! Error taxonomy for the assembly pipeline.
//!
//! Core modules return these typed errors; the CLI boundary wraps them in
//! `anyhow` with context. Resolution-time errors are fatal for their
//! argument (subject to the configured strictness), render-time errors
//! degrade to inline stand-in text in the output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NanodocError {
    /// Malformed line-reference syntax, e.g. `L5-3` or `Lx`.
    #[error("invalid line reference: {0}")]
    InvalidSelector(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("file is not readable: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path is a directory, not a file: {}", .0.display())]
    IsADirectory(PathBuf),

    /// A selector resolved outside `1..=line_count` for the actual file.
    #[error("line reference out of range: {selector} (file has {line_count} lines)")]
    RangeOutOfBounds { selector: String, line_count: usize },

    #[error("bundle file not found: {}", .0.display())]
    BundleNotFound(PathBuf),

    /// A bundle manifest with zero resolvable entries.
    #[error("bundle contains no usable entries: {}", .0.display())]
    EmptyBundle(PathBuf),

    /// Nothing survived expansion and validation.
    #[error("no valid source files found")]
    NoValidSources,

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NanodocError {
    /// Map an I/O error on `path` to the matching taxonomy variant.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => {
                Self::InvalidInput(format!("file is not valid UTF-8: {}", path.display()))
            }
            _ => Self::Io(err),
        }
    }
}

//! Gitignore-aware directory expansion.
//! - Respects .gitignore, .git/info/exclude, and global gitignore
//! - Extra ignore globs (early prune + late filter)
//! - Extension allow-list (default `.txt` + `.md`)
//! - Deterministic ordering for stable tests/CI
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};

use crate::core::error::NanodocError;

/// Walker that expands a directory argument into its bundleable files.
/// Extra globs are applied in two places:
///   1) Early: prune directories during traversal (filter_entry).
///   2) Late: filter out files that still slipped through.
pub struct DirectoryWalker
{
    /// Extensions to include, with their leading dot (".txt", ".md")
    extensions: Vec<String>,

    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,
}

impl DirectoryWalker
{
    /// Build a walker for the given extension allow-list plus extra
    /// ignore patterns (e.g. "drafts/**", "**/*.bak").
    pub fn new(
        extensions: &[String],
        additional_ignores: &[String],
    ) -> Result<Self, NanodocError>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self {
            extensions: extensions.to_vec(),
            ignore_patterns: builder.build()?,
        })
    }

    /// Traverse `root`, honoring ignore rules, and return the matching
    /// files **sorted by full path** for deterministic output.
    pub fn walk<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let root_path = root.as_ref();

        let mut builder = WalkBuilder::new(root_path);

        // Respect .gitignore at every level, plus repo excludes and the
        // user's global gitignore
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);

        // Early directory pruning with the extra globs
        let extra = self
            .ignore_patterns
            .clone();
        builder.filter_entry(move |entry: &DirEntry| {
            let is_dir = entry
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false);

            !(is_dir && extra.is_match(entry.path()))
        });

        let mut out: Vec<PathBuf> = builder
            .build()
            .filter_map(|res| res.ok())
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|path| self.matches_extension(path))
            .filter(|abs| {
                // Late file-level filtering uses the relative path
                let rel = abs
                    .strip_prefix(root_path)
                    .unwrap_or(abs);
                !self
                    .ignore_patterns
                    .is_match(rel)
            })
            .collect();

        out.sort();

        out
    }

    fn matches_extension(
        &self,
        path: &Path,
    ) -> bool
    {
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
        else
        {
            return false;
        };

        self.extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }
}

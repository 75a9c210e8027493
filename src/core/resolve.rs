//! Argument expansion: files, directories, and bundle manifests.
//!
//! Each CLI argument resolves into zero or more [`ContentItem`]s:
//! - a directory expands to its bundleable files (gitignore-aware,
//!   extension allow-list, sorted by full path);
//! - a bundle manifest expands to the files it lists, or to one
//!   synthetic inline item when the manifest mixes literal text with
//!   file inclusions;
//! - anything else is a single content file, selector and all.
//!
//! Bundle classification is heuristic: a file is sniffed as a bundle
//! when the first of its leading non-empty, non-comment lines (at most
//! five are examined) names an existing file. A `.bundle` extension
//! bypasses the sniff entirely.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::NanodocError;
use crate::core::item::ContentItem;
use crate::core::range::{self, LineRange};
use crate::infra::config::{Config, Strictness};
use crate::infra::walk::DirectoryWalker;

/// A path selected for inclusion, before it becomes a [`ContentItem`].
/// `ranges` is `None` for whole-file references.
#[derive(Debug, Clone)]
pub struct FileReference {
    pub original: String,
    pub path: PathBuf,
    pub ranges: Option<Vec<LineRange>>,
}

impl FileReference {
    pub fn parse(arg: &str) -> Result<Self, NanodocError> {
        let (path, selector) = range::split_line_reference(arg);
        let ranges = selector.map(range::parse_selector).transpose()?;
        Ok(Self {
            original: arg.to_string(),
            path: PathBuf::from(path),
            ranges,
        })
    }

    pub fn into_item(self) -> ContentItem {
        let ranges = self.ranges.unwrap_or_else(|| vec![LineRange::whole_file()]);
        ContentItem::new(self.original, self.path, ranges)
    }
}

/// Expand every argument into a flat, ordered item list.
pub fn expand_args(args: &[String], cfg: &Config) -> Result<Vec<ContentItem>, NanodocError> {
    let mut items = Vec::new();
    for arg in args {
        items.extend(expand_single_arg(arg, cfg)?);
    }
    Ok(items)
}

/// Expand one argument: directory, bundle manifest, or plain file.
pub fn expand_single_arg(arg: &str, cfg: &Config) -> Result<Vec<ContentItem>, NanodocError> {
    // ~ and $VAR both expand; an undefined variable is an error for
    // this argument, handled by the caller's strictness policy
    let arg = shellexpand::full(arg)
        .map_err(|err| NanodocError::InvalidInput(format!("cannot expand {arg}: {err}")))?
        .into_owned();
    debug!(%arg, "expanding argument");

    let (path, selector) = range::split_line_reference(&arg);

    if Path::new(&arg).is_dir() {
        return expand_directory(Path::new(&arg), cfg);
    }

    if is_bundle_file(Path::new(path)) {
        return expand_bundle(Path::new(path), selector, &arg, cfg);
    }

    Ok(vec![FileReference::parse(&arg)?.into_item()])
}

/// Collect a directory's bundleable files, sorted by full path.
fn expand_directory(dir: &Path, cfg: &Config) -> Result<Vec<ContentItem>, NanodocError> {
    let walker = DirectoryWalker::new(&cfg.extensions, &cfg.ignore_patterns)?;
    let files = walker.walk(dir);
    debug!(dir = %dir.display(), count = files.len(), "expanded directory");

    Ok(files
        .into_iter()
        .map(|path| {
            let original = path.display().to_string();
            ContentItem::new(original, path, vec![LineRange::whole_file()])
        })
        .collect())
}

/// Decide whether a path is a bundle manifest.
///
/// A `.bundle` extension is an explicit override. Otherwise up to five
/// leading lines are sniffed: the first non-empty, non-comment line
/// classifies the file — bundle if it names an existing file (selector
/// suffix allowed), ordinary content otherwise.
pub fn is_bundle_file(path: &Path) -> bool {
    // The extension declares intent, so a missing .bundle stays a
    // bundle and expansion reports BundleNotFound instead of a plain
    // file skip
    if path.extension().and_then(|ext| ext.to_str()) == Some("bundle") {
        return true;
    }

    let Ok(text) = std::fs::read_to_string(path) else {
        return false;
    };

    for line in text.lines().take(5) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        return is_file_path_line(line);
    }
    false
}

/// True when a manifest line names an existing file, ignoring any
/// trailing `:L...` selector.
pub fn is_file_path_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return false;
    }
    let (path, _) = range::split_line_reference(line);
    Path::new(path).is_file()
}

/// Expand a bundle manifest into items.
///
/// A selector on the bundle argument restricts which manifest lines are
/// read. Traditional bundles (every line a file reference) expand to one
/// item per line; mixed-content bundles collapse to a single synthetic
/// inline item.
fn expand_bundle(
    path: &Path,
    selector: Option<&str>,
    original_arg: &str,
    cfg: &Config,
) -> Result<Vec<ContentItem>, NanodocError> {
    debug!(bundle = %path.display(), "expanding bundle");

    let ranges = selector.map(range::parse_selector).transpose()?;
    let mut manifest = ContentItem::new(
        original_arg,
        path,
        ranges.unwrap_or_else(|| vec![LineRange::whole_file()]),
    );
    let text = match manifest.content() {
        Ok(text) => text.to_string(),
        Err(NanodocError::FileNotFound(_)) => {
            return Err(NanodocError::BundleNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err),
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        return match cfg.strictness {
            Strictness::Strict => Err(NanodocError::EmptyBundle(path.to_path_buf())),
            Strictness::Lenient => {
                tracing::warn!(bundle = %path.display(), "bundle has no usable entries, skipping");
                Ok(Vec::new())
            }
        };
    }

    if lines.iter().all(|line| is_file_path_line(line)) {
        // Traditional bundle: one item per listed file reference
        lines
            .into_iter()
            .map(|line| Ok(FileReference::parse(line)?.into_item()))
            .collect()
    } else {
        // Mixed content: literal text with in-place file inclusions
        let synthetic = process_mixed_content(&lines)?;
        Ok(vec![ContentItem::from_inline(original_arg, path, synthetic)])
    }
}

/// Render a mixed-content bundle to its synthetic document.
///
/// Lines that are file references are replaced by that file's content;
/// `@[path]` markers embed a file mid-line with its internal newlines
/// collapsed to single spaces; everything else passes through.
pub fn process_mixed_content(lines: &[&str]) -> Result<String, NanodocError> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if is_file_path_line(line) {
            let mut item = ContentItem::from_arg(line)?;
            out.push(item.content()?.to_string());
        } else {
            out.push(substitute_inline_markers(line)?);
        }
    }
    Ok(out.join("\n"))
}

/// Replace each `@[path]` marker whose path is an existing file with
/// that file's content, newlines collapsed to spaces. Markers naming
/// missing files stay literal.
fn substitute_inline_markers(line: &str) -> Result<String, NanodocError> {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find("@[") {
        let after = &rest[start + 2..];
        let Some(close) = after.find(']') else {
            break;
        };
        let path = &after[..close];

        out.push_str(&rest[..start]);
        if Path::new(path).is_file() {
            let mut item = ContentItem::from_arg(path)?;
            out.push_str(&item.content()?.replace('\n', " "));
        } else {
            out.push_str(&rest[start..start + 2 + close + 1]);
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn sniff_classifies_manifest_of_paths_as_bundle() {
        let dir = TempDir::new().unwrap();
        let target = write(&dir, "target.txt", "content\n");
        let bundle = write(
            &dir,
            "bundle.txt",
            &format!("# comment\n\n{}\n", target.display()),
        );
        assert!(is_bundle_file(&bundle));
    }

    #[test]
    fn sniff_rejects_prose_even_with_later_paths() {
        let dir = TempDir::new().unwrap();
        let target = write(&dir, "target.txt", "content\n");
        let prose = write(
            &dir,
            "prose.txt",
            &format!("Just some prose.\n{}\n", target.display()),
        );
        assert!(!is_bundle_file(&prose));
    }

    #[test]
    fn bundle_extension_overrides_sniffing() {
        let dir = TempDir::new().unwrap();
        let bundle = write(&dir, "anything.bundle", "not a path at all\n");
        assert!(is_bundle_file(&bundle));
    }

    #[test]
    fn traditional_bundle_expands_per_line() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.txt", "A\n");
        let b = write(&dir, "b.txt", "B\n");
        let bundle = write(
            &dir,
            "bundle.txt",
            &format!("{}\n{}:L1\n", a.display(), b.display()),
        );

        let cfg = Config::default();
        let items =
            expand_single_arg(&bundle.display().to_string(), &cfg).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, a);
        assert_eq!(items[1].path, b);
        assert!(items[1].selector_annotation().is_some());
    }

    #[test]
    fn mixed_bundle_becomes_single_inline_item() {
        let dir = TempDir::new().unwrap();
        let lamb = write(&dir, "lamb.txt", "and the lambs are silent\n");
        let bundle = write(
            &dir,
            "poem.txt",
            &format!(
                "Mary had a little lamb\n{}\nHis fleece was white as snow, yeah\n",
                lamb.display()
            ),
        );

        let cfg = Config::default();
        let items = expand_single_arg(&bundle.display().to_string(), &cfg).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_inline());

        let mut item = items.into_iter().next().unwrap();
        assert_eq!(
            item.content().unwrap(),
            "Mary had a little lamb\nand the lambs are silent\nHis fleece was white as snow, yeah"
        );
    }

    #[test]
    fn inline_markers_collapse_newlines() {
        let dir = TempDir::new().unwrap();
        let quote = write(&dir, "quote.txt", "To be or not to be\nThat is the question\n");
        let line = format!("Shakespeare once wrote: @[{}]", quote.display());

        let result = substitute_inline_markers(&line).unwrap();
        assert_eq!(
            result,
            "Shakespeare once wrote: To be or not to be That is the question"
        );
    }

    #[test]
    fn unresolvable_markers_stay_literal() {
        let result = substitute_inline_markers("see @[missing.txt] here").unwrap();
        assert_eq!(result, "see @[missing.txt] here");
    }

    #[test]
    fn empty_bundle_policy_follows_strictness() {
        let dir = TempDir::new().unwrap();
        let target = write(&dir, "t.txt", "x\n");
        // First line is a real path so the sniff says bundle; a selector
        // restricted to the comment line leaves nothing to expand
        let bundle = write(&dir, "b.txt", &format!("{}\n# only a comment\n", target.display()));
        let arg = format!("{}:L2", bundle.display());

        let lenient = Config::default();
        assert!(expand_single_arg(&arg, &lenient).unwrap().is_empty());

        let strict = Config { strictness: Strictness::Strict, ..Config::default() };
        assert!(matches!(
            expand_single_arg(&arg, &strict),
            Err(NanodocError::EmptyBundle(_))
        ));
    }

    #[test]
    fn environment_variables_expand_in_arguments() {
        let dir = TempDir::new().unwrap();
        let target = write(&dir, "env.txt", "via env\n");

        // set_var is unsafe in edition 2024; no other test reads this name
        unsafe { std::env::set_var("NANODOC_RESOLVE_FIXTURE_DIR", dir.path()) };
        let cfg = Config::default();
        let items =
            expand_single_arg("$NANODOC_RESOLVE_FIXTURE_DIR/env.txt", &cfg).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, target);
    }

    #[test]
    fn undefined_variable_is_rejected_not_passed_through() {
        let cfg = Config::default();
        let err =
            expand_single_arg("$NANODOC_NO_SUCH_VARIABLE/file.txt", &cfg).unwrap_err();
        assert!(matches!(err, NanodocError::InvalidInput(_)));
        assert!(err.to_string().contains("NANODOC_NO_SUCH_VARIABLE"));
    }

    #[test]
    fn directory_expansion_is_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", "b\n");
        write(&dir, "a.md", "a\n");
        write(&dir, "c.bin", "c\n");

        let cfg = Config::default();
        let items = expand_single_arg(&dir.path().display().to_string(), &cfg).unwrap();
        let names: Vec<_> = items
            .iter()
            .map(|item| item.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt"]);
    }

    #[test]
    fn missing_bundle_maps_to_bundle_not_found() {
        let dir = TempDir::new().unwrap();
        let ghost = dir.path().join("ghost.bundle");
        assert!(is_bundle_file(&ghost));

        let cfg = Config::default();
        let err = expand_single_arg(&ghost.display().to_string(), &cfg).unwrap_err();
        assert!(matches!(err, NanodocError::BundleNotFound(_)));
    }
}

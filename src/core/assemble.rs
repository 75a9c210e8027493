//! Two-pass document assembly plus the top-level run entry point.
//!
//! Pass 1 projects where each file will start so the TOC can name exact
//! line numbers; pass 2 renders headers, numbering, and content. The
//! projected number for a file must equal the 1-indexed line of that
//! file's header in the final document (first content line when headers
//! are off) — the tests pin this down by counting lines in the output.

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::cli::{AppContext, Cli};
use crate::core::error::NanodocError;
use crate::core::format::{self, NameStyle, SequenceStyle};
use crate::core::item::{self, ContentItem};
use crate::core::resolve;
use crate::infra::config::{self, Strictness};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingMode {
    #[default]
    None,
    /// `-n`: numbers are the original file line numbers, restarting per file.
    PerFile,
    /// `-nn`: one running counter across the whole document.
    Global,
}

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    pub numbering: NumberingMode,
    pub toc: bool,
    pub show_header: bool,
    pub style: NameStyle,
    pub sequence: Option<SequenceStyle>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            numbering: NumberingMode::None,
            toc: false,
            show_header: true,
            style: NameStyle::Nice,
            sequence: None,
        }
    }
}

/// Lines a file block occupies before its content: blank, header, blank.
const HEADER_OVERHEAD: usize = 3;

/// Render the full document from validated items, in their final order.
pub fn assemble(
    items: &mut [ContentItem],
    opts: &AssembleOptions,
) -> Result<String, NanodocError> {
    let mut lines: Vec<String> = Vec::new();

    if opts.toc {
        lines.extend(build_toc(items, opts)?);
    }

    let mut counter = 0usize;
    for index in 0..items.len() {
        let block = render_item(&mut items[index], index, opts, counter)?;
        counter += block.content_lines;
        lines.extend(block.lines);
    }

    Ok(lines.join("\n"))
}

/// Pass 1: TOC block with projected line numbers.
///
/// The block is `TOC`, a blank line, one entry per item, and a trailing
/// blank, so the body starts at line `len(items) + 4`.
fn build_toc(
    items: &mut [ContentItem],
    opts: &AssembleOptions,
) -> Result<Vec<String>, NanodocError> {
    let toc_size = items.len() + 3;

    // Entry text first: the dot leaders align on the longest name
    let mut names = Vec::with_capacity(items.len());
    for item in items.iter() {
        let mut name = format::style_display_name(&item.display_path(), opts.style);
        if let Some(annotation) = item.selector_annotation() {
            name.push_str(&format!(" ({annotation})"));
        }
        names.push(name);
    }
    let max_name_len = names.iter().map(String::len).max().unwrap_or_default();

    let mut running = toc_size;
    let mut entries = Vec::with_capacity(items.len());
    for (item, name) in items.iter_mut().zip(names) {
        let count = projected_line_count(item);
        let projected = if opts.show_header {
            running + 2
        } else {
            running + 1
        };
        running += if opts.show_header { HEADER_OVERHEAD + count } else { count };

        let dots = ".".repeat(max_name_len - name.len() + 5);
        entries.push(format!("{name} {dots} {projected}"));
    }

    let mut lines = vec!["TOC".to_string(), String::new()];
    lines.extend(entries);
    lines.push(String::new());
    Ok(lines)
}

/// Line count an item will contribute. A file that fails to load here
/// renders as exactly one line in pass 2 (the inline error stand-in),
/// so the projection counts it as one to keep later entries aligned.
fn projected_line_count(item: &mut ContentItem) -> usize {
    item.rendered_line_count().unwrap_or(1)
}

struct RenderedBlock {
    lines: Vec<String>,
    /// Content lines that advance the global numbering counter.
    content_lines: usize,
}

/// Pass 2, one file: optional header padding, then content with optional
/// line numbers. A file deleted since validation degrades to an inline
/// error line that is never numbered and never advances the counter.
fn render_item(
    item: &mut ContentItem,
    index: usize,
    opts: &AssembleOptions,
    counter: usize,
) -> Result<RenderedBlock, NanodocError> {
    let mut lines = Vec::new();

    if opts.show_header {
        let header = format::format_header(
            &item.display_path(),
            opts.sequence,
            index,
            opts.style,
        );
        lines.push(String::new());
        lines.push(header);
        lines.push(String::new());
    }

    let content = match item.content() {
        Ok(content) => content.to_string(),
        Err(NanodocError::FileNotFound(path)) => {
            lines.push(format!("Error: File not found: {}", path.display()));
            return Ok(RenderedBlock { lines, content_lines: 0 });
        }
        Err(err) => return Err(err),
    };

    let file_numbers = match opts.numbering {
        NumberingMode::PerFile => Some(item.line_numbers()?),
        _ => None,
    };

    let mut content_lines = 0usize;
    for (i, line) in content.lines().enumerate() {
        let prefix = match opts.numbering {
            NumberingMode::None => String::new(),
            NumberingMode::Global => format!("{:>4}: ", counter + i + 1),
            NumberingMode::PerFile => {
                let n = file_numbers
                    .as_ref()
                    .and_then(|numbers| numbers.get(i).copied())
                    .unwrap_or(i + 1);
                format!("{n:>4}: ")
            }
        };
        lines.push(format!("{prefix}{line}"));
        content_lines += 1;
    }

    Ok(RenderedBlock { lines, content_lines })
}

/// Top-level orchestration for the CLI: resolve, validate, sort, render.
pub fn run(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let cfg = config::load_config().context("Failed to load configuration")?;

    let opts = AssembleOptions {
        numbering: cli.numbering_mode(),
        toc: cli.toc,
        show_header: !cli.no_header,
        style: cli.style.or(cfg.style).unwrap_or(NameStyle::Nice),
        sequence: cli.sequence,
    };

    // Resolution: each argument expands independently so one bad
    // argument only kills the run under strict policy
    let mut items: Vec<ContentItem> = Vec::new();
    for arg in &cli.sources {
        match resolve::expand_single_arg(arg, &cfg) {
            Ok(expanded) => items.extend(expanded),
            Err(err) => match cfg.strictness {
                Strictness::Strict => return Err(err.into()),
                Strictness::Lenient => warn(ctx, &format!("skipping {arg}: {err}")),
            },
        }
    }

    // Validation under the same policy
    let mut valid: Vec<ContentItem> = Vec::new();
    for mut item in items {
        match item.validate() {
            Ok(()) => valid.push(item),
            Err(err) => match cfg.strictness {
                Strictness::Strict => return Err(err.into()),
                Strictness::Lenient => {
                    warn(ctx, &format!("skipping {}: {err}", item.original_arg));
                }
            },
        }
    }

    if valid.is_empty() {
        return Err(NanodocError::NoValidSources.into());
    }

    valid.sort_by_key(|item| item::sort_key(&item.path));
    debug!(count = valid.len(), "assembling document");

    let document = assemble(&mut valid, &opts)?;
    println!("{document}");
    Ok(())
}

fn warn(ctx: &AppContext, message: &str) {
    if ctx.quiet {
        return;
    }
    if ctx.no_color {
        eprintln!("warning: {message}");
    } else {
        eprintln!("{} {message}", "warning:".yellow());
    }
}

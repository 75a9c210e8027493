//! Header construction: name styling and sequence prefixes.
//!
//! The canonical header is the plain line-oriented form, `prefix +
//! styled name`, padded with blank lines by the assembler. The older
//! fixed-width `### text ###` banner is gone.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::error::NanodocError;

/// How a file's name is rendered in headers and TOC entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// Just the basename, unchanged.
    Filename,
    /// The full path as given on the command line.
    Path,
    /// Title-cased stem with the original basename parenthesized.
    Nice,
}

/// Optional sequence prefix for headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceStyle {
    /// `1. `, `2. `, ...
    Numerical,
    /// `a. ` through `z. `, wrapping back to `a. ` (never `aa. `).
    Letter,
    /// Lowercase roman numerals: `i. `, `ii. `, ...
    Roman,
}

/// Apply a name style to a file path.
///
/// `nice` strips the extension, turns `-`/`_` into spaces, title-cases
/// the words, and appends the original basename in parentheses:
/// `foo-bar_baz.txt` becomes `Foo Bar Baz (foo-bar_baz.txt)`.
pub fn style_display_name(original: &str, style: NameStyle) -> String {
    let path = Path::new(original);
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| original.to_string());

    match style {
        NameStyle::Filename => filename,
        NameStyle::Path => original.to_string(),
        NameStyle::Nice => {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| filename.clone());
            let spaced = stem.replace(['-', '_'], " ");
            format!("{} ({filename})", title_case(&spaced))
        }
    }
}

/// Sequence prefix for a zero-based position, empty when no style is set.
pub fn sequence_prefix(style: Option<SequenceStyle>, index: usize) -> String {
    let Some(style) = style else {
        return String::new();
    };
    let one_indexed = index + 1;
    match style {
        SequenceStyle::Numerical => format!("{one_indexed}. "),
        SequenceStyle::Letter => {
            let letter = (b'a' + ((one_indexed - 1) % 26) as u8) as char;
            format!("{letter}. ")
        }
        // one_indexed is always positive here, so conversion cannot fail
        SequenceStyle::Roman => format!("{}. ", to_roman(one_indexed).unwrap_or_default()),
    }
}

/// Build a header line for a file: sequence prefix plus styled name.
pub fn format_header(
    original: &str,
    sequence: Option<SequenceStyle>,
    seq_index: usize,
    style: NameStyle,
) -> String {
    let styled = style_display_name(original, style);
    let prefix = sequence_prefix(sequence, seq_index);
    format!("{prefix}{styled}")
}

/// Lowercase roman numeral via standard subtractive notation.
///
/// # Errors
///
/// Returns [`NanodocError::InvalidInput`] for zero.
pub fn to_roman(mut number: usize) -> Result<String, NanodocError> {
    if number == 0 {
        return Err(NanodocError::InvalidInput(
            "roman numeral input must be a positive integer".into(),
        ));
    }

    const TABLE: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut out = String::new();
    for (value, symbol) in TABLE {
        while number >= value {
            out.push_str(symbol);
            number -= value;
        }
    }
    Ok(out)
}

/// Uppercase the first letter of each space-separated word, lowercase
/// the rest (matching the original tool's title-casing).
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

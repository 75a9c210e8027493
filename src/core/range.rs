//! Line-reference selectors: `L5`, `L10-20`, `L5,L10-20,L30`, `L3-X`.
//!
//! A selector is a comma-separated list of segments. Each segment is a
//! single line (`L<n>`) or an inclusive range (`L<n>-<m>`), where `<m>`
//! may be the end-of-file token `X`. Segments keep their input order:
//! they are never sorted, merged, or de-duplicated, so overlapping
//! ranges re-emit their lines verbatim downstream.

use crate::core::error::NanodocError;

/// End bound of a range: a concrete 1-based line, or end of file.
///
/// The sentinel stays symbolic until the file is actually read; it is
/// resolved against the real line count by [`LineRange::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Line(usize),
    Eof,
}

/// Inclusive 1-based line range within a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: RangeEnd,
}

impl LineRange {
    pub fn new(start: usize, end: RangeEnd) -> Self {
        Self { start, end }
    }

    /// The implicit range used when an argument has no selector.
    pub fn whole_file() -> Self {
        Self { start: 1, end: RangeEnd::Eof }
    }

    pub fn is_single_line(&self) -> bool {
        matches!(self.end, RangeEnd::Line(end) if end == self.start)
    }

    pub fn is_whole_file(&self) -> bool {
        self.start == 1 && self.end == RangeEnd::Eof
    }

    /// Resolve the end sentinel against the file's actual line count.
    /// Returns concrete inclusive `(start, end)` line numbers.
    pub fn normalize(&self, line_count: usize) -> (usize, usize) {
        let end = match self.end {
            RangeEnd::Line(end) => end,
            RangeEnd::Eof => line_count,
        };
        (self.start, end)
    }

    /// Canonical selector spelling, e.g. `L5`, `L5-10`, `L5-X`.
    pub fn to_selector(&self) -> String {
        match self.end {
            RangeEnd::Line(end) if end == self.start => format!("L{}", self.start),
            RangeEnd::Line(end) => format!("L{}-{}", self.start, end),
            RangeEnd::Eof => format!("L{}-X", self.start),
        }
    }
}

/// Parse a selector string into its ranges, preserving input order.
///
/// # Errors
///
/// Returns [`NanodocError::InvalidSelector`] for an empty selector, a
/// segment without the `L` marker, a non-positive line number, an end
/// bound below the start, or trailing garbage after a number.
pub fn parse_selector(selector: &str) -> Result<Vec<LineRange>, NanodocError> {
    if selector.is_empty() {
        return Err(NanodocError::InvalidSelector("empty line reference".into()));
    }

    let mut ranges = Vec::new();
    for segment in selector.split(',') {
        let Some(numbers) = segment.strip_prefix('L') else {
            return Err(NanodocError::InvalidSelector(format!(
                "segment must start with 'L': {segment}"
            )));
        };

        match numbers.split_once('-') {
            Some((start, "X")) => {
                let start = parse_line_number(start, segment)?;
                ranges.push(LineRange::new(start, RangeEnd::Eof));
            }
            Some((start, end)) => {
                let start = parse_line_number(start, segment)?;
                let end = parse_line_number(end, segment)?;
                if start > end {
                    return Err(NanodocError::InvalidSelector(format!(
                        "start line must be less than or equal to end line: {segment}"
                    )));
                }
                ranges.push(LineRange::new(start, RangeEnd::Line(end)));
            }
            None => {
                let line = parse_line_number(numbers, segment)?;
                ranges.push(LineRange::new(line, RangeEnd::Line(line)));
            }
        }
    }

    Ok(ranges)
}

/// Render a range list back to selector syntax (`,`-joined).
pub fn ranges_to_selector(ranges: &[LineRange]) -> String {
    ranges
        .iter()
        .map(LineRange::to_selector)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split an argument like `path:L5-10` into the path and its selector.
/// The selector, when present, keeps its leading `L`.
pub fn split_line_reference(arg: &str) -> (&str, Option<&str>) {
    match arg.find(":L") {
        Some(idx) => (&arg[..idx], Some(&arg[idx + 1..])),
        None => (arg, None),
    }
}

fn parse_line_number(text: &str, segment: &str) -> Result<usize, NanodocError> {
    let number: usize = text
        .parse()
        .map_err(|_| NanodocError::InvalidSelector(format!("invalid line number: {segment}")))?;
    if number == 0 {
        return Err(NanodocError::InvalidSelector(format!(
            "line numbers must be positive: {segment}"
        )));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_preserves_order_and_duplicates() {
        let ranges = parse_selector("L5,L10-15,L20").unwrap();
        assert_eq!(
            ranges,
            vec![
                LineRange::new(5, RangeEnd::Line(5)),
                LineRange::new(10, RangeEnd::Line(15)),
                LineRange::new(20, RangeEnd::Line(20)),
            ]
        );

        // Out-of-order and overlapping segments stay verbatim
        let ranges = parse_selector("L10-12,L2,L10-12").unwrap();
        assert_eq!(ranges[0], ranges[2]);
        assert_eq!(ranges[1].start, 2);
    }

    #[test]
    fn parse_eof_sentinel() {
        let ranges = parse_selector("L3-X").unwrap();
        assert_eq!(ranges, vec![LineRange::new(3, RangeEnd::Eof)]);
        assert_eq!(ranges[0].normalize(5), (3, 5));
    }

    #[test]
    fn reversed_bounds_are_rejected_not_swapped() {
        let err = parse_selector("L5-3").unwrap_err();
        assert!(matches!(err, NanodocError::InvalidSelector(_)));
        assert!(err.to_string().contains("L5-3"));
    }

    #[test]
    fn rejects_malformed_segments() {
        assert!(parse_selector("").is_err());
        assert!(parse_selector("5-10").is_err());
        assert!(parse_selector("L0").is_err());
        assert!(parse_selector("L5-0").is_err());
        assert!(parse_selector("Lfive").is_err());
        assert!(parse_selector("L5x").is_err());
        assert!(parse_selector("L5-").is_err());
    }

    #[test]
    fn selector_spelling_round_trip() {
        for sel in ["L5", "L5-10", "L5-X", "L1,L3-4,L9-X"] {
            let ranges = parse_selector(sel).unwrap();
            assert_eq!(ranges_to_selector(&ranges), sel);
        }
    }

    #[test]
    fn split_reference_forms() {
        assert_eq!(split_line_reference("a.txt"), ("a.txt", None));
        assert_eq!(split_line_reference("a.txt:L5"), ("a.txt", Some("L5")));
        assert_eq!(
            split_line_reference("docs/b.md:L5-10,L20"),
            ("docs/b.md", Some("L5-10,L20"))
        );
    }

    proptest! {
        #[test]
        fn parse_format_round_trip(segments in prop::collection::vec((1usize..500, 0usize..500), 1..6)) {
            let ranges: Vec<LineRange> = segments
                .iter()
                .map(|&(start, extra)| {
                    if extra == 0 {
                        LineRange::new(start, RangeEnd::Eof)
                    } else {
                        LineRange::new(start, RangeEnd::Line(start + extra))
                    }
                })
                .collect();
            let spelled = ranges_to_selector(&ranges);
            prop_assert_eq!(parse_selector(&spelled).unwrap(), ranges);
        }
    }
}

//! Newline index: LF/CRLF-robust line counting and line→byte mapping.
//!
//! One pass over the bytes records every '\n' position; line numbers are
//! 1-based externally. Span ends exclude the line's own terminator (and
//! the '\r' before it for CRLF files), so an extracted span never ends
//! in a newline. An empty buffer has 0 lines; a non-empty buffer with no
//! trailing '\n' still counts its last line.

#[derive(Debug, Clone)]
pub struct NewlineIndex {
    /// Byte offsets of every '\n'.
    newlines: Vec<usize>,
    /// Total buffer length in bytes.
    len: usize,
}

impl NewlineIndex {
    pub fn build(bytes: &[u8]) -> Self {
        let mut newlines = Vec::new();
        let mut from = 0usize;
        while let Some(offset) = memchr::memchr(b'\n', &bytes[from..]) {
            newlines.push(from + offset);
            from += offset + 1;
        }
        Self { newlines, len: bytes.len() }
    }

    /// Number of logical lines, counting a final line without '\n'.
    /// An empty buffer has 0 lines.
    pub fn line_count(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        match self.newlines.last() {
            Some(&last) if last == self.len - 1 => self.newlines.len(),
            _ => self.newlines.len() + 1,
        }
    }

    /// Start byte (inclusive) of a 1-based line, `None` if out of range.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        if line == 1 {
            return Some(0);
        }
        self.newlines.get(line - 2).map(|&nl| nl + 1)
    }

    /// End byte (exclusive) of a 1-based line, excluding its '\n' and
    /// any '\r' before it. `None` if out of range.
    pub fn line_end(&self, line: usize, bytes: &[u8]) -> Option<usize> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        match self.newlines.get(line - 1) {
            Some(&nl) => {
                if nl > 0 && bytes.get(nl - 1) == Some(&b'\r') {
                    Some(nl - 1)
                } else {
                    Some(nl)
                }
            }
            // Last line without a trailing '\n' runs to EOF
            None => Some(self.len),
        }
    }

    /// Byte span covering an inclusive 1-based line range, with the
    /// final line's terminator excluded. `None` for invalid bounds.
    pub fn span(&self, start: usize, end: usize, bytes: &[u8]) -> Option<(usize, usize)> {
        if start == 0 || end < start {
            return None;
        }
        let lo = self.line_start(start)?;
        let hi = self.line_end(end, bytes)?;
        (lo <= hi).then_some((lo, hi))
    }
}

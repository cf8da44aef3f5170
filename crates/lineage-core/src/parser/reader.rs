//! Physical-line reader with `CONT` / `CONC` folding.
//!
//! [`LineReader`] walks an in-memory source and yields one [`RawLine`] per
//! logical record line. After reading a line it looks at the next non-blank
//! physical line: if that line's tag is `CONT` its value is appended after a
//! newline, if it is `CONC` the value is appended directly, and the lookahead
//! repeats. Any other line is held back for the next call.
//!
//! Line numbers are 1-based physical positions. Blank lines and folded
//! continuation lines advance the counter like any other line.

use tracing::trace;

use super::tokenizer::split_tag_value;

/// One logical line, after continuation folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    /// Physical line on which the logical line starts.
    pub line_no: usize,
}

/// Failures raised while reading physical lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("line {line} is {length} characters long, the limit is {max}")]
    LineTooLong {
        line: usize,
        length: usize,
        max: usize,
    },
}

impl ReadError {
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::LineTooLong { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Physical<'a> {
    text: &'a str,
    line_no: usize,
}

/// Continuation-aware reader over a source held in memory.
#[derive(Debug)]
pub struct LineReader<'a> {
    source: &'a str,
    pos: usize,
    scanned: usize,
    max_len: usize,
    held: Option<Physical<'a>>,
}

impl<'a> LineReader<'a> {
    pub const fn new(source: &'a str, max_len: usize) -> Self {
        Self {
            source,
            pos: 0,
            scanned: 0,
            max_len,
            held: None,
        }
    }

    /// Number of the last physical line consumed.
    ///
    /// A line held back by the lookahead does not count as consumed.
    #[must_use]
    pub fn line(&self) -> usize {
        self.held
            .map_or(self.scanned, |held| held.line_no.saturating_sub(1))
    }

    /// Read the next logical line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::LineTooLong`] when a physical line, including a
    /// continuation line seen during lookahead, exceeds the limit.
    pub fn next_line(&mut self) -> Result<Option<RawLine>, ReadError> {
        let first = match self.held.take() {
            Some(held) => held,
            None => match self.next_non_blank() {
                Some(line) => line,
                None => return Ok(None),
            },
        };

        self.check_length(first)?;
        let mut text = first.text.trim_start().to_string();

        while let Some(next) = self.next_non_blank() {
            let (tag, value) = split_tag_value(next.text.trim_start());
            match tag {
                "CONT" => {
                    self.check_length(next)?;
                    trace!(line = next.line_no, "folding CONT");
                    text.push('\n');
                    text.push_str(value);
                }
                "CONC" => {
                    self.check_length(next)?;
                    trace!(line = next.line_no, "folding CONC");
                    text.push_str(value);
                }
                _ => {
                    self.held = Some(next);
                    break;
                }
            }
        }

        Ok(Some(RawLine {
            text,
            line_no: first.line_no,
        }))
    }

    /// Lines held back by the lookahead are checked when they are consumed,
    /// so the error lands on the logical line that owns them.
    fn check_length(&self, line: Physical<'_>) -> Result<(), ReadError> {
        let length = line.text.chars().count();
        if length > self.max_len {
            return Err(ReadError::LineTooLong {
                line: line.line_no,
                length,
                max: self.max_len,
            });
        }
        Ok(())
    }

    fn next_non_blank(&mut self) -> Option<Physical<'a>> {
        while let Some(line) = self.next_physical() {
            if !line.text.trim().is_empty() {
                return Some(line);
            }
        }
        None
    }

    /// Split off the next physical line. Accepts `\n`, `\r\n` and `\r`; the
    /// final line may end without a terminator.
    fn next_physical(&mut self) -> Option<Physical<'a>> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let (text, consumed) = match rest.find(['\n', '\r']) {
            Some(idx) => {
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..idx], idx + terminator)
            }
            None => (rest, rest.len()),
        };

        self.pos += consumed;
        self.scanned += 1;
        Some(Physical {
            text,
            line_no: self.scanned,
        })
    }
}

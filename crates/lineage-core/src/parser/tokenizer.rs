//! Split a logical line into `LEVEL [XREF] TAG VALUE`.

use std::fmt;

use super::reader::RawLine;

/// A tokenized logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub level: usize,
    /// Cross-reference identifier (`@I1@`) preceding the tag, if present.
    pub xref: Option<String>,
    pub tag: String,
    /// Everything after the single delimiter that follows the tag. May be
    /// empty and may contain newlines from `CONT` folding.
    pub value: String,
    pub line_no: usize,
}

impl Line {
    /// `true` for a level-0 line, which opens a new record.
    #[must_use]
    pub const fn starts_record(&self) -> bool {
        self.level == 0
    }

    /// `true` for the `0 TRLR` trailer.
    #[must_use]
    pub fn is_trailer(&self) -> bool {
        self.level == 0 && self.tag == "TRLR"
    }

    /// `true` if this is a level-0 record of the given type.
    #[must_use]
    pub fn is_record(&self, tag: &str) -> bool {
        self.level == 0 && self.tag == tag
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(xref) = &self.xref {
            write!(f, " {xref}")?;
        }
        write!(f, " {}", self.tag)?;
        if !self.value.is_empty() {
            write!(f, " {}", self.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("line {line} has no tag")]
    MissingTag { line: usize },
    #[error("line {line} has a non-numeric level '{raw}'")]
    InvalidLevel { line: usize, raw: String },
}

impl TokenizeError {
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingTag { line } | Self::InvalidLevel { line, .. } => *line,
        }
    }
}

/// Tokenize one logical line.
///
/// # Errors
///
/// Fails when the level is not a non-negative integer or the tag is missing.
pub fn tokenize(raw: &RawLine) -> Result<Line, TokenizeError> {
    let line = raw.line_no;
    let (level_tok, rest) = take_token(raw.text.trim_start());
    if level_tok.is_empty() || !level_tok.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenizeError::InvalidLevel {
            line,
            raw: level_tok.to_string(),
        });
    }
    let level = level_tok
        .parse::<usize>()
        .map_err(|_| TokenizeError::InvalidLevel {
            line,
            raw: level_tok.to_string(),
        })?;

    let (second, rest) = take_token(skip_delimiters(rest));
    if second.is_empty() {
        return Err(TokenizeError::MissingTag { line });
    }

    let (xref, tag, rest) = if is_xref(second) {
        let (tag, rest) = take_token(skip_delimiters(rest));
        (Some(second.to_string()), tag, rest)
    } else {
        (None, second, rest)
    };
    if tag.is_empty() {
        return Err(TokenizeError::MissingTag { line });
    }

    Ok(Line {
        level,
        xref,
        tag: tag.to_string(),
        value: strip_delimiter(rest).to_string(),
        line_no: line,
    })
}

/// Tag and value of a physical line, ignoring the level. Used by the reader
/// to spot continuation lines without a full tokenize.
pub(crate) fn split_tag_value(text: &str) -> (&str, &str) {
    let (_, rest) = take_token(text);
    let (tag, rest) = take_token(skip_delimiters(rest));
    (tag, strip_delimiter(rest))
}

fn is_xref(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('@') && token.ends_with('@')
}

const fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

fn take_token(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| is_delimiter(c) || c == '\n')
        .unwrap_or(text.len());
    text.split_at(end)
}

fn skip_delimiters(text: &str) -> &str {
    text.trim_start_matches(is_delimiter)
}

fn strip_delimiter(text: &str) -> &str {
    text.strip_prefix(is_delimiter).unwrap_or(text)
}

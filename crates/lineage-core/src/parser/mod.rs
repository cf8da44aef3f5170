//! Two-pass GEDCOM parser.
//!
//! # Format
//!
//! ```text
//! LEVEL [@XREF@] TAG [VALUE]
//! ```
//!
//! - Level-0 lines open records (`HEAD`, `SUBM`, `INDI`, `FAM`, ...); the
//!   stream ends with `0 TRLR`.
//! - `CONT` / `CONC` lines continue the value of the line above them and are
//!   folded by the [`reader`].
//!
//! # Passes
//!
//! The source is held in memory and scanned several times, each scan with a
//! fresh [`Cursor`]:
//!
//! 1. [`header`]: the `HEAD` block, then a re-scan for the `SUBM` record it
//!    points at.
//! 2. [`individual`]: every `INDI` record, building the identifier table.
//! 3. [`family`]: every `FAM` record, resolving `HUSB` / `WIFE` / `CHIL`
//!    pointers against that table and linking both directions.
//!
//! The first error aborts the parse and nothing is returned. Unknown tags
//! inside known records are kept as opaque [`Field`](crate::model::Field)s.

pub mod event;
pub mod family;
pub mod header;
pub mod individual;
pub mod reader;
pub mod tokenizer;

use std::path::Path;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{ErrorKind, GedcomError};
use crate::model::Document;

use reader::{LineReader, ReadError};
use tokenizer::{Line, TokenizeError, tokenize};

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse GEDCOM text with the default [`ParserConfig`].
///
/// # Errors
///
/// Returns the first [`GedcomError`] encountered.
pub fn parse_str(source: &str) -> Result<Document, GedcomError> {
    parse_str_with(source, &ParserConfig::default())
}

/// Parse GEDCOM text.
///
/// # Errors
///
/// Returns the first [`GedcomError`] encountered.
pub fn parse_str_with(source: &str, config: &ParserConfig) -> Result<Document, GedcomError> {
    let header = header::parse_header(&mut Cursor::new(source, config))?;
    debug!(
        source = %header.source,
        version = header.version,
        encoding = %header.encoding,
        submitter = %header.submitter_xref,
        "parsed header"
    );

    let submitter =
        header::parse_submitter(&mut Cursor::new(source, config), &header.submitter_xref)?;

    let table = individual::parse_individuals(&mut Cursor::new(source, config), config)?;
    debug!(individuals = table.individuals.len(), "individual pass complete");

    let (individuals, families) =
        family::resolve_families(&mut Cursor::new(source, config), table)?;
    debug!(families = families.len(), "family pass complete");

    Ok(Document::from_parts(header, submitter, individuals, families))
}

/// Read and parse a `.ged` file with the default [`ParserConfig`].
///
/// # Errors
///
/// [`ErrorKind::InvalidFile`] if the path lacks the `.ged` extension or
/// cannot be read; otherwise as [`parse_str`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, GedcomError> {
    parse_file_with(path, &ParserConfig::default())
}

/// Read and parse a file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; the
/// declared `CHAR` encoding is recorded but not applied.
///
/// # Errors
///
/// [`ErrorKind::InvalidFile`] if the extension check is enabled and fails,
/// or the file cannot be read; otherwise as [`parse_str_with`].
pub fn parse_file_with(
    path: impl AsRef<Path>,
    config: &ParserConfig,
) -> Result<Document, GedcomError> {
    let path = path.as_ref();
    if config.require_extension && !has_ged_extension(path) {
        return Err(GedcomError::invalid_file(format!(
            "{} does not have a .ged extension",
            path.display()
        )));
    }

    let bytes = std::fs::read(path).map_err(|err| {
        GedcomError::invalid_file(format!("failed to read {}: {err}", path.display()))
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read GEDCOM file");

    parse_str_with(&String::from_utf8_lossy(&bytes), config)
}

/// `true` if `path` ends in `.ged`, ignoring case.
#[must_use]
pub fn has_ged_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ged"))
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Which part of the document is being read. Decides the error kind for
/// reader and tokenizer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    FirstLine,
    Header,
    Record,
}

impl Phase {
    fn read_error(self, err: &ReadError) -> GedcomError {
        let kind = match self {
            Self::FirstLine => ErrorKind::InvalidFile,
            Self::Header => ErrorKind::InvalidHeader,
            Self::Record => ErrorKind::InvalidRecord,
        };
        GedcomError::new(kind, Some(err.line()), err.to_string())
    }

    fn tokenize_error(self, err: &TokenizeError) -> GedcomError {
        let kind = match self {
            Self::FirstLine => ErrorKind::InvalidDocument,
            Self::Header => ErrorKind::InvalidHeader,
            Self::Record => ErrorKind::InvalidRecord,
        };
        GedcomError::new(kind, Some(err.line()), err.to_string())
    }

    /// Error for a malformed line found while in this phase.
    pub(crate) fn error(self, line: usize, detail: impl Into<String>) -> GedcomError {
        match self {
            Self::FirstLine => GedcomError::invalid_document(Some(line), detail),
            Self::Header => GedcomError::invalid_header(line, detail),
            Self::Record => GedcomError::invalid_record(line, detail),
        }
    }
}

/// Tokenized line stream with one line of push-back.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    reader: LineReader<'a>,
    peeked: Option<Line>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, config: &ParserConfig) -> Self {
        Self {
            reader: LineReader::new(source, config.max_line_length),
            peeked: None,
        }
    }

    /// Next tokenized line, or `None` at end of input.
    pub(crate) fn next(&mut self, phase: Phase) -> Result<Option<Line>, GedcomError> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        let raw = match self.reader.next_line() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(err) => return Err(phase.read_error(&err)),
        };
        tokenize(&raw)
            .map(Some)
            .map_err(|err| phase.tokenize_error(&err))
    }

    /// Next line; end of input is an invalid-document error.
    pub(crate) fn expect_next(&mut self, phase: Phase, inside: &str) -> Result<Line, GedcomError> {
        self.next(phase)?
            .ok_or_else(|| self.unexpected_end(inside))
    }

    /// Next line nested below `parent_level`, or `None` once a line at or
    /// above that level is reached. That line is pushed back.
    pub(crate) fn next_child(
        &mut self,
        parent_level: usize,
        inside: &str,
    ) -> Result<Option<Line>, GedcomError> {
        let line = self.expect_next(Phase::Record, inside)?;
        if line.level <= parent_level {
            self.push_back(line);
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Discard every line nested below `parent_level`.
    pub(crate) fn skip_children(
        &mut self,
        parent_level: usize,
        inside: &str,
    ) -> Result<(), GedcomError> {
        while self.next_child(parent_level, inside)?.is_some() {}
        Ok(())
    }

    /// Advance to the next level-0 line.
    pub(crate) fn next_record(&mut self) -> Result<Line, GedcomError> {
        loop {
            let line = self.expect_next(Phase::Record, "the record stream")?;
            if line.starts_record() {
                return Ok(line);
            }
        }
    }

    pub(crate) fn push_back(&mut self, line: Line) {
        self.peeked = Some(line);
    }

    /// Last physical line consumed from the source.
    pub(crate) fn last_line(&self) -> usize {
        self.reader.line()
    }

    fn unexpected_end(&self, inside: &str) -> GedcomError {
        GedcomError::invalid_document(
            Some(self.last_line()),
            format!("end of input inside {inside} before 0 TRLR"),
        )
    }
}

/// The trimmed value of `line`, which must not be empty.
pub(crate) fn required_value(line: &Line, phase: Phase) -> Result<&str, GedcomError> {
    let value = line.value.trim();
    if value.is_empty() {
        return Err(phase.error(line.line_no, format!("{} has no value", line.tag)));
    }
    Ok(value)
}

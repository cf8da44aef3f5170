//! Error surface shared by the parser, writer and JSON layers.
//!
//! Every failure is reported as a [`GedcomError`]: one [`ErrorKind`] plus the
//! 1-based physical source line where it was detected, when the failure is
//! line-addressable. Rendering follows the `"<label>: line <n>"` convention
//! so callers can show a short, stable message.

use std::fmt;

/// The category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing, unreadable or wrongly-named source file.
    InvalidFile,
    /// Structurally unparseable input: missing trailer, truncated record
    /// stream, unresolved submitter.
    InvalidDocument,
    /// Missing or invalid required header field.
    InvalidHeader,
    /// Malformed record or sub-record, unresolved cross-reference, or a line
    /// missing its tag or value.
    InvalidRecord,
    /// Destination unwritable, or document missing required fields at write
    /// time.
    WriteError,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidFile => "E1001",
            Self::InvalidDocument => "E2001",
            Self::InvalidHeader => "E2002",
            Self::InvalidRecord => "E2003",
            Self::WriteError => "E5001",
        }
    }

    /// Short label used when rendering an error.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidFile => "Invalid file",
            Self::InvalidDocument => "Invalid GEDCOM",
            Self::InvalidHeader => "Invalid header",
            Self::InvalidRecord => "Invalid record",
            Self::WriteError => "Write error",
        }
    }

    /// Snake-case identifier for JSON error output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidFile => "invalid_file",
            Self::InvalidDocument => "invalid_document",
            Self::InvalidHeader => "invalid_header",
            Self::InvalidRecord => "invalid_record",
            Self::WriteError => "write_error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidFile => Some("Check that the path exists, is readable and ends in `.ged`."),
            Self::InvalidDocument => {
                Some("The file must start with `0 HEAD` and end with `0 TRLR`.")
            }
            Self::InvalidHeader => {
                Some("The header needs SOUR, GEDC/VERS, CHAR and SUBM lines.")
            }
            Self::InvalidRecord => {
                Some("Fix the referenced line; pointers must name an existing record.")
            }
            Self::WriteError => Some("Check write permissions and the document's header fields."),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parse, validation or write failure.
///
/// `Display` renders the short form (`"Invalid record: line 12"`); the
/// longer explanation is available through [`GedcomError::detail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.render())]
pub struct GedcomError {
    kind: ErrorKind,
    line: Option<usize>,
    detail: String,
}

impl GedcomError {
    /// Build an error of `kind` at an optional 1-based source line.
    pub fn new(kind: ErrorKind, line: Option<usize>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            detail: detail.into(),
        }
    }

    pub fn invalid_file(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFile, None, detail)
    }

    pub fn invalid_document(line: Option<usize>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDocument, line, detail)
    }

    pub fn invalid_header(line: usize, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidHeader, Some(line), detail)
    }

    pub fn invalid_record(line: usize, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRecord, Some(line), detail)
    }

    pub fn write_error(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::WriteError, None, detail)
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based physical line where the failure was detected, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Human explanation of what went wrong.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Short rendering: the kind label, plus `": line <n>"` when known.
    #[must_use]
    pub fn render(&self) -> String {
        match self.line {
            Some(line) => format!("{}: line {line}", self.kind.label()),
            None => self.kind.label().to_string(),
        }
    }
}

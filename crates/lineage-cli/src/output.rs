//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! The precedence itself lives in `lineage_core::config::resolve_config`;
//! this module only maps the resolved name onto a mode.

use lineage_core::GedcomError;
use serde::Serialize;
use std::io::{self, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Plain tab-separated text for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map a resolved mode name (`pretty`, `text`, `json`) onto a mode.
    /// Anything unrecognised falls back to text.
    pub fn from_resolved(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Text,
        }
    }

    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Implemented by row types that are listed by several commands.
pub trait Renderable {
    /// One human-readable line.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// A self-contained JSON value, without a trailing newline.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// One tab-separated row, in [`table_headers`](Renderable::table_headers) order.
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Write `items` to `out`: one line each, a header row in text mode, or a
/// JSON array.
pub fn write_list<R: Renderable>(
    out: &mut dyn Write,
    items: &[R],
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(out)?;
            }
        }
        OutputMode::Text => {
            let headers = if items.is_empty() {
                &[] as &[&str]
            } else {
                R::table_headers()
            };
            if !headers.is_empty() {
                writeln!(out, "{}", headers.join("\t"))?;
            }
            for item in items {
                item.render_table(out)?;
            }
        }
        OutputMode::Json => {
            write!(out, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(out, ",")?;
                }
                item.render_json(out)?;
            }
            writeln!(out, "]")?;
        }
    }
    Ok(())
}

/// Render a list of [`Renderable`] items to stdout.
pub fn render_list<R: Renderable>(items: &[R], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_list(&mut out, items, mode)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render a serializable value to stdout; pretty and text share `human_fn`.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

/// A structured error with optional detail, suggestion and error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Longer explanation, when the message alone is terse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2003", "person_not_found").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// 1-based source line, for parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            detail: None,
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
            line: None,
        }
    }
}

impl From<&GedcomError> for CliError {
    fn from(err: &GedcomError) -> Self {
        Self {
            message: err.to_string(),
            detail: Some(err.detail().to_string()).filter(|d| !d.is_empty()),
            suggestion: err.kind().hint().map(str::to_string),
            error_code: Some(err.kind().code().to_string()),
            line: err.line(),
        }
    }
}

/// Write `error` to `out` in the requested format.
pub fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref detail) = error.detail {
                writeln!(out, "  detail: {detail}")?;
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::ErrorKind;

    struct Row {
        name: &'static str,
        count: u32,
    }

    impl Renderable for Row {
        fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}: {}", self.name, self.count)
        }

        fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
            write!(w, "{{\"name\":\"{}\",\"count\":{}}}", self.name, self.count)
        }

        fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}\t{}", self.name, self.count)
        }

        fn table_headers() -> &'static [&'static str] {
            &["NAME", "COUNT"]
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row { name: "a", count: 1 }, Row { name: "b", count: 2 }]
    }

    fn list(mode: OutputMode, items: &[Row]) -> String {
        let mut buf = Vec::new();
        write_list(&mut buf, items, mode).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn from_resolved_names() {
        assert_eq!(OutputMode::from_resolved("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_resolved("pretty"), OutputMode::Pretty);
        assert_eq!(OutputMode::from_resolved("text"), OutputMode::Text);
        assert_eq!(OutputMode::from_resolved("other"), OutputMode::Text);
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Pretty.is_json());
    }

    #[test]
    fn text_list_has_header_row() {
        assert_eq!(list(OutputMode::Text, &rows()), "NAME\tCOUNT\na\t1\nb\t2\n");
    }

    #[test]
    fn empty_text_list_has_no_header() {
        assert_eq!(list(OutputMode::Text, &[]), "");
    }

    #[test]
    fn json_list_is_valid_array() {
        let text = list(OutputMode::Json, &rows());
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value[1]["name"], "b");
        assert_eq!(list(OutputMode::Json, &[]), "[]\n");
    }

    #[test]
    fn pretty_list_uses_human_lines() {
        assert_eq!(list(OutputMode::Pretty, &rows()), "a: 1\nb: 2\n");
    }

    #[test]
    fn gedcom_error_maps_to_cli_error() {
        let err = GedcomError::invalid_record(7, "unknown pointer @I9@");
        let cli = CliError::from(&err);
        assert_eq!(cli.message, "Invalid record: line 7");
        assert_eq!(cli.detail.as_deref(), Some("unknown pointer @I9@"));
        assert_eq!(cli.error_code.as_deref(), Some(ErrorKind::InvalidRecord.code()));
        assert_eq!(cli.line, Some(7));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn human_error_lists_detail_and_suggestion() {
        let err =
            CliError::with_details("person not found", "check the spelling", "person_not_found");
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Text, &err).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "error: person not found\n  suggestion: check the spelling\n");
    }

    #[test]
    fn json_error_is_wrapped() {
        let err = CliError::from(&GedcomError::invalid_file("missing"));
        let mut buf = Vec::new();
        write_error(&mut buf, OutputMode::Json, &err).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["error"]["message"], "Invalid file");
        assert_eq!(value["error"]["error_code"], "E1001");
        assert!(value["error"].get("line").is_none());
    }
}

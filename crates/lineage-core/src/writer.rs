//! Canonical GEDCOM output.
//!
//! Records are written in a fixed order: header, submitter, individuals,
//! families, trailer. Cross-references are regenerated from arena positions
//! (`@I0001@`, `@F001@`), so a parse of the output yields the same graph
//! shape even though identifiers may differ from the source file.
//!
//! Values containing newlines are written back as `CONT` lines, and any
//! line that would exceed the length limit is split with `CONC`. Opaque
//! fields are written at their recorded depth below the owning record or
//! event, so nested sub-lines never land where a typed tag is read.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::config::DEFAULT_MAX_LINE_LENGTH;
use crate::error::GedcomError;
use crate::model::document::DEFAULT_SUBMITTER_XREF;
use crate::model::{Document, Event, FamilyId, IndividualId};

/// Write `doc` to `out` with the default line-length limit.
///
/// # Errors
///
/// [`ErrorKind::WriteError`](crate::error::ErrorKind::WriteError) if the
/// header lacks a source or version, or `out` fails.
pub fn write_document<W: Write>(doc: &Document, out: &mut W) -> Result<(), GedcomError> {
    write_document_with(doc, out, DEFAULT_MAX_LINE_LENGTH)
}

/// Write `doc` to `out`, keeping every physical line within
/// `max_line_length` characters.
///
/// # Errors
///
/// As [`write_document`].
pub fn write_document_with<W: Write>(
    doc: &Document,
    out: &mut W,
    max_line_length: usize,
) -> Result<(), GedcomError> {
    let text = render(doc, max_line_length)?;
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| GedcomError::write_error(format!("failed to write output: {err}")))
}

/// Render `doc` as GEDCOM text.
///
/// # Errors
///
/// As [`write_document`], minus I/O failures.
pub fn to_gedcom_string(doc: &Document) -> Result<String, GedcomError> {
    render(doc, DEFAULT_MAX_LINE_LENGTH)
}

/// Write `doc` to the file at `path`, replacing it.
///
/// # Errors
///
/// As [`write_document`], or if the file cannot be created.
pub fn write_file(doc: &Document, path: impl AsRef<Path>) -> Result<(), GedcomError> {
    let path = path.as_ref();
    let text = to_gedcom_string(doc)?;
    std::fs::write(path, text).map_err(|err| {
        GedcomError::write_error(format!("failed to write {}: {err}", path.display()))
    })?;
    debug!(path = %path.display(), "wrote GEDCOM file");
    Ok(())
}

fn render(doc: &Document, max_line_length: usize) -> Result<String, GedcomError> {
    let header = doc.header();
    if header.source.trim().is_empty() {
        return Err(GedcomError::write_error("document has no source"));
    }
    if !(header.version.is_finite() && header.version > 0.0) {
        return Err(GedcomError::write_error("document has no version"));
    }

    let mut out = Emitter::new(max_line_length);

    out.line(0, None, "HEAD", "");
    out.line(1, None, "SOUR", &header.source);
    out.line(1, None, "GEDC", "");
    out.line(2, None, "VERS", &header.version.to_string());
    out.line(2, None, "FORM", "LINEAGE-LINKED");
    out.line(1, None, "CHAR", header.encoding.as_str());
    out.line(1, None, "SUBM", DEFAULT_SUBMITTER_XREF);

    let submitter = doc.submitter();
    out.line(0, Some(DEFAULT_SUBMITTER_XREF), "SUBM", "");
    if !submitter.name.is_empty() {
        out.line(1, None, "NAME", &submitter.name);
    }
    if let Some(address) = &submitter.address {
        out.line(1, None, "ADDR", address);
    }

    for (id, person) in doc.iter_individuals() {
        out.line(0, Some(&individual_xref(id)), "INDI", "");
        out.line(1, None, "NAME", &name_value(person.given_name(), person.surname()));
        // Fields go right after NAME so its sub-lines stay attached to it.
        for field in person.fields() {
            out.line(field.depth, None, &field.tag, &field.value);
        }
        for event in person.events() {
            out.event(1, event);
        }
        for &family_id in person.families() {
            let Some(family) = doc.family(family_id) else {
                continue;
            };
            let tag = if family.is_spouse(id) { "FAMS" } else { "FAMC" };
            out.line(1, None, tag, &family_xref(family_id));
        }
    }

    for (id, family) in doc.iter_families() {
        out.line(0, Some(&family_xref(id)), "FAM", "");
        if let Some(husband) = family.husband() {
            out.line(1, None, "HUSB", &individual_xref(husband));
        }
        if let Some(wife) = family.wife() {
            out.line(1, None, "WIFE", &individual_xref(wife));
        }
        for event in family.events() {
            out.event(1, event);
        }
        for &child in family.children() {
            out.line(1, None, "CHIL", &individual_xref(child));
        }
    }

    out.line(0, None, "TRLR", "");
    debug!(
        individuals = doc.individuals().len(),
        families = doc.families().len(),
        bytes = out.text.len(),
        "rendered document"
    );
    Ok(out.text)
}

/// `NAME` value for a person. Both parts empty gives an empty value, which
/// parses back to the same empty names.
fn name_value(given: &str, surname: &str) -> String {
    match (given.is_empty(), surname.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("/{surname}/"),
        _ => format!("{given} /{surname}/"),
    }
}

fn individual_xref(id: IndividualId) -> String {
    format!("@I{:04}@", id.index() + 1)
}

fn family_xref(id: FamilyId) -> String {
    format!("@F{:03}@", id.index() + 1)
}

struct Emitter {
    text: String,
    max_len: usize,
}

impl Emitter {
    const fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            max_len,
        }
    }

    fn event(&mut self, level: usize, event: &Event) {
        self.line(level, None, &event.event_type, "");
        if !event.date.is_empty() {
            self.line(level + 1, None, "DATE", &event.date);
        }
        if !event.place.is_empty() {
            self.line(level + 1, None, "PLAC", &event.place);
        }
        for field in &event.fields {
            self.line(level + field.depth, None, &field.tag, &field.value);
        }
    }

    /// One tagged value, continued with `CONT` at newlines and `CONC` where
    /// a physical line would run over the limit.
    fn line(&mut self, level: usize, xref: Option<&str>, tag: &str, value: &str) {
        let prefix = match xref {
            Some(xref) => format!("{level} {xref} {tag}"),
            None => format!("{level} {tag}"),
        };
        let continuation = level + 1;
        let mut segments = value.split('\n');
        let first = segments.next().unwrap_or_default();
        self.split_physical(prefix, first, continuation);
        for segment in segments {
            self.split_physical(format!("{continuation} CONT"), segment, continuation);
        }
    }

    fn split_physical(&mut self, mut prefix: String, value: &str, continuation: usize) {
        let conc = format!("{continuation} CONC");
        let mut rest = value;
        loop {
            let room = self
                .max_len
                .saturating_sub(prefix.chars().count() + 1)
                .max(1);
            let split = rest
                .char_indices()
                .nth(room)
                .map_or(rest.len(), |(idx, _)| idx);
            let (chunk, tail) = rest.split_at(split);

            self.text.push_str(&prefix);
            if !chunk.is_empty() {
                self.text.push(' ');
                self.text.push_str(chunk);
            }
            self.text.push('\n');

            if tail.is_empty() {
                break;
            }
            rest = tail;
            prefix.clone_from(&conc);
        }
    }
}

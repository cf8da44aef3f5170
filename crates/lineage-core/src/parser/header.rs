//! `HEAD` block and submitter record.

use tracing::debug;

use super::{Cursor, Phase, required_value};
use crate::error::GedcomError;
use crate::model::{Encoding, Field, Header, Submitter};

/// Parse the first line and the `HEAD` block.
///
/// Leaves the cursor on the first level-0 line after the header.
pub(crate) fn parse_header(cursor: &mut Cursor<'_>) -> Result<Header, GedcomError> {
    let Some(first) = cursor.next(Phase::FirstLine)? else {
        return Err(GedcomError::invalid_file("input is empty"));
    };
    if first.tag == "HEAD" && first.level != 0 {
        return Err(GedcomError::invalid_header(
            first.line_no,
            format!("HEAD must be at level 0, found level {}", first.level),
        ));
    }
    if !first.is_record("HEAD") || first.xref.is_some() {
        return Err(GedcomError::invalid_document(
            Some(first.line_no),
            format!("first line must be `0 HEAD`, found `{first}`"),
        ));
    }

    let mut source = None;
    let mut version = None;
    let mut encoding = None;
    let mut submitter_xref = None;
    let mut fields = Vec::new();
    let mut in_gedc = false;
    let mut after_gedc = false;

    let end_line = loop {
        let line = cursor.expect_next(Phase::Header, "the header")?;
        let follows_gedc = std::mem::take(&mut after_gedc);

        if line.tag == "VERS" && in_gedc && line.level == 2 {
            let raw = required_value(&line, Phase::Header)?;
            let parsed = parse_version(raw).ok_or_else(|| {
                GedcomError::invalid_header(line.line_no, format!("bad version '{raw}'"))
            })?;
            version = Some(parsed);
            continue;
        }
        if line.tag == "VERS" && follows_gedc {
            return Err(GedcomError::invalid_record(
                line.line_no,
                format!("VERS under GEDC must be at level 2, found level {}", line.level),
            ));
        }
        if line.level <= 1 {
            in_gedc = false;
        }
        if line.starts_record() {
            let end = line.line_no;
            cursor.push_back(line);
            break end;
        }

        match (line.level, line.tag.as_str()) {
            (1, "SOUR") => source = Some(required_value(&line, Phase::Header)?.to_string()),
            (1, "GEDC") => {
                in_gedc = true;
                after_gedc = true;
            }
            (1, "CHAR") => {
                let parsed = required_value(&line, Phase::Header)?
                    .parse::<Encoding>()
                    .map_err(|err| GedcomError::invalid_header(line.line_no, err.to_string()))?;
                encoding = Some(parsed);
            }
            (1, "SUBM") => {
                submitter_xref = Some(required_value(&line, Phase::Header)?.to_string());
            }
            _ => fields.push(Field::nested(line.tag, line.value, line.level)),
        }
    };

    let missing =
        |what: &str| GedcomError::invalid_header(end_line, format!("header has no {what}"));
    Ok(Header {
        source: source.ok_or_else(|| missing("SOUR"))?,
        version: version.ok_or_else(|| missing("GEDC/VERS"))?,
        encoding: encoding.ok_or_else(|| missing("CHAR"))?,
        submitter_xref: submitter_xref.ok_or_else(|| missing("SUBM"))?,
        fields,
    })
}

/// Find and parse the `SUBM` record named by the header.
///
/// Re-scans from the cursor's position, which is the start of the source for
/// a fresh cursor.
pub(crate) fn parse_submitter(
    cursor: &mut Cursor<'_>,
    xref: &str,
) -> Result<Submitter, GedcomError> {
    let not_found = || GedcomError::invalid_document(None, format!("submitter {xref} not found"));
    loop {
        let Some(line) = cursor.next(Phase::Record)? else {
            return Err(not_found());
        };
        if line.is_trailer() {
            return Err(not_found());
        }
        if line.is_record("SUBM") && line.xref.as_deref() == Some(xref) {
            debug!(xref, line = line.line_no, "found submitter record");
            break;
        }
    }

    let mut submitter = Submitter::default();
    let mut named = false;
    while let Some(line) = cursor.next_child(0, "the submitter record")? {
        match (line.level, line.tag.as_str()) {
            (1, "NAME") if !named => {
                submitter.name = required_value(&line, Phase::Record)?.to_string();
                named = true;
            }
            (1, "ADDR") if submitter.address.is_none() => {
                submitter.address = Some(line.value);
            }
            _ => submitter
                .fields
                .push(Field::nested(line.tag, line.value, line.level)),
        }
    }
    Ok(submitter)
}

/// Leading numeric prefix of a version string: `5.5.1` is `5.5`.
///
/// Returns `None` when there are no leading digits or the result is zero.
pub(crate) fn parse_version(value: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = value
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(value.len(), |(idx, _)| idx);

    let prefix = value[..end].trim_end_matches('.');
    prefix
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

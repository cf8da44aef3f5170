//! First pass: `INDI` records and the identifier table.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::{Cursor, event};
use crate::config::ParserConfig;
use crate::error::GedcomError;
use crate::model::individual::split_name;
use crate::model::{Event, Field, Individual, IndividualId};

/// Record types that are valid GEDCOM but have no place in the graph.
const IGNORED_RECORDS: &[&str] = &["NOTE", "OBJE", "REPO", "SOUR", "SUBN"];

/// Individuals in source order plus the `@XREF@` to handle table used by the
/// family pass.
#[derive(Debug, Default)]
pub(crate) struct IndividualTable {
    pub individuals: Vec<Individual>,
    pub index: HashMap<String, IndividualId>,
}

pub(crate) fn parse_individuals(
    cursor: &mut Cursor<'_>,
    config: &ParserConfig,
) -> Result<IndividualTable, GedcomError> {
    let mut table = IndividualTable::default();

    loop {
        let record = cursor.next_record()?;
        match record.tag.as_str() {
            "TRLR" => break,
            "INDI" => {
                let Some(xref) = record.xref else {
                    return Err(GedcomError::invalid_record(
                        record.line_no,
                        "INDI record has no identifier",
                    ));
                };
                if table.index.contains_key(&xref) {
                    warn!(line = record.line_no, %xref, "duplicate individual identifier");
                    return Err(GedcomError::invalid_record(
                        record.line_no,
                        format!("individual {xref} is defined twice"),
                    ));
                }

                let person = parse_individual(cursor, config)?;
                debug!(%xref, line = record.line_no, name = %person, "parsed individual");
                table
                    .index
                    .insert(xref, IndividualId(table.individuals.len()));
                table.individuals.push(person);
            }
            "HEAD" | "SUBM" | "FAM" => {}
            tag if IGNORED_RECORDS.contains(&tag) => {
                debug!(line = record.line_no, record_type = tag, "skipping record");
            }
            other => {
                warn!(
                    line = record.line_no,
                    record_type = other,
                    "skipping record with unknown type"
                );
            }
        }
    }

    Ok(table)
}

fn parse_individual(
    cursor: &mut Cursor<'_>,
    config: &ParserConfig,
) -> Result<Individual, GedcomError> {
    let mut person = Individual::default();
    let mut named = false;

    while let Some(line) = cursor.next_child(0, "an individual record")? {
        if line.level == 1 && line.tag == "NAME" && !named {
            let (given, surname) = split_name(&line.value);
            person.set_names(given, surname);
            named = true;
            continue;
        }
        if !config.retain_individual_events {
            continue;
        }

        match line.tag.as_str() {
            tag if line.level == 1 && Event::is_individual_event_tag(tag) => {
                person.push_event(event::parse_event(cursor, &line)?);
            }
            "FAMS" | "FAMC" if line.level == 1 => {
                cursor.skip_children(line.level, "an individual record")?;
            }
            _ => person.push_field(Field::nested(line.tag, line.value, line.level)),
        }
    }

    Ok(person)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SOURCE: &str = "\
0 HEAD
0 @I1@ INDI
1 NAME John /Smith/
1 NAME Johnny /Smyth/
1 SEX M
1 BIRT
2 DATE 1 JAN 1900
2 PLAC Leeds
1 FAMS @F1@
2 NOTE primary
0 @N1@ NOTE free text
0 @I2@ INDI
1 NAME Jane /Doe/
0 @X1@ _CUSTOM
0 TRLR
";

    fn parse(source: &str, retain: bool) -> Result<IndividualTable, GedcomError> {
        let config = ParserConfig {
            retain_individual_events: retain,
            ..ParserConfig::default()
        };
        parse_individuals(&mut Cursor::new(source, &config), &config)
    }

    #[test]
    fn default_mode_keeps_only_names() {
        let table = parse(SOURCE, false).expect("parse");
        assert_eq!(table.individuals.len(), 2);
        let john = &table.individuals[0];
        assert_eq!(john.given_name(), "John");
        assert_eq!(john.surname(), "Smith");
        assert!(john.events().is_empty());
        assert!(john.fields().is_empty());
        assert_eq!(table.index.get("@I2@"), Some(&IndividualId(1)));
    }

    #[test]
    fn retain_mode_keeps_events_and_fields() {
        let table = parse(SOURCE, true).expect("parse");
        let john = &table.individuals[0];
        assert_eq!(john.events().len(), 1);
        assert_eq!(john.events()[0].event_type, "BIRT");
        assert_eq!(john.events()[0].date, "1 JAN 1900");
        assert_eq!(john.events()[0].place, "Leeds");
        let tags: Vec<_> = john.fields().iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, ["NAME", "SEX"]);
    }

    #[test]
    fn retained_sub_lines_keep_their_depth() {
        let source = "0 HEAD\n0 @I1@ INDI\n1 NAME A /B/\n2 GIVN A\n1 _X y\n2 _Y z\n0 TRLR\n";
        let table = parse(source, true).expect("parse");
        assert_eq!(
            table.individuals[0].fields(),
            &[
                Field::nested("GIVN", "A", 2),
                Field::new("_X", "y"),
                Field::nested("_Y", "z", 2),
            ]
        );
    }

    #[test]
    fn duplicate_identifier_is_invalid_record() {
        let source = "0 HEAD\n0 @I1@ INDI\n1 NAME A /B/\n0 @I1@ INDI\n0 TRLR\n";
        let err = parse(source, false).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::InvalidRecord);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn missing_identifier_is_invalid_record() {
        let err = parse("0 HEAD\n0 INDI\n0 TRLR\n", false).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::InvalidRecord);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn missing_trailer_is_invalid_document() {
        let err = parse("0 HEAD\n0 @I1@ INDI\n1 NAME A /B/\n", false).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::InvalidDocument);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn person_without_name_has_empty_names() {
        let table = parse("0 HEAD\n0 @I1@ INDI\n1 SEX F\n0 TRLR\n", false).expect("parse");
        assert_eq!(table.individuals[0].full_name(), "");
    }
}

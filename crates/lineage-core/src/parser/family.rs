//! Second pass: `FAM` records.
//!
//! Each `HUSB`, `WIFE` and `CHIL` pointer is looked up in the identifier
//! table from the first pass. A resolved pointer fills the family slot and
//! adds the family to the person's family set in the same step, so both
//! directions of every edge exist together. The first unresolved pointer
//! aborts the pass.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::individual::IndividualTable;
use super::tokenizer::Line;
use super::{Cursor, Phase, event, required_value};
use crate::error::GedcomError;
use crate::model::{Event, Family, FamilyId, Field, Individual, IndividualId};

pub(crate) fn resolve_families(
    cursor: &mut Cursor<'_>,
    table: IndividualTable,
) -> Result<(Vec<Individual>, Vec<Family>), GedcomError> {
    let IndividualTable {
        mut individuals,
        index,
    } = table;
    let mut families = Vec::new();

    loop {
        let record = cursor.next_record()?;
        if record.is_trailer() {
            break;
        }
        if record.tag != "FAM" {
            continue;
        }

        let id = FamilyId(families.len());
        let family = parse_family(cursor, id, &index, &mut individuals)?;
        debug!(
            line = record.line_no,
            xref = record.xref.as_deref().unwrap_or("-"),
            children = family.children().len(),
            "resolved family"
        );
        families.push(family);
    }

    Ok((individuals, families))
}

fn parse_family(
    cursor: &mut Cursor<'_>,
    id: FamilyId,
    index: &HashMap<String, IndividualId>,
    individuals: &mut [Individual],
) -> Result<Family, GedcomError> {
    let mut family = Family::default();

    while let Some(line) = cursor.next_child(0, "a family record")? {
        match (line.level, line.tag.as_str()) {
            (1, "HUSB") => {
                let person = resolve(&line, index)?;
                check_slot(&line, family.husband(), person)?;
                family.set_husband(person);
                link(individuals, person, id);
            }
            (1, "WIFE") => {
                let person = resolve(&line, index)?;
                check_slot(&line, family.wife(), person)?;
                family.set_wife(person);
                link(individuals, person, id);
            }
            (1, "CHIL") => {
                let person = resolve(&line, index)?;
                if family.has_child(person) {
                    warn!(
                        line = line.line_no,
                        pointer = %line.value.trim(),
                        "ignoring repeated CHIL"
                    );
                } else {
                    family.push_child(person);
                    link(individuals, person, id);
                }
            }
            (1, tag) if Event::is_family_event_tag(tag) => {
                family.push_event(event::parse_event(cursor, &line)?);
            }
            _ => family.push_field(Field::nested(line.tag, line.value, line.level)),
        }
    }

    Ok(family)
}

fn resolve(
    line: &Line,
    index: &HashMap<String, IndividualId>,
) -> Result<IndividualId, GedcomError> {
    let pointer = required_value(line, Phase::Record)?;
    index.get(pointer).copied().ok_or_else(|| {
        GedcomError::invalid_record(
            line.line_no,
            format!("{} points at unknown individual {pointer}", line.tag),
        )
    })
}

/// A spouse slot may be filled once; repeating the same pointer is allowed.
fn check_slot(
    line: &Line,
    current: Option<IndividualId>,
    person: IndividualId,
) -> Result<(), GedcomError> {
    match current {
        Some(existing) if existing != person => Err(GedcomError::invalid_record(
            line.line_no,
            format!("family already has a {}", line.tag),
        )),
        _ => Ok(()),
    }
}

fn link(individuals: &mut [Individual], person: IndividualId, family: FamilyId) {
    if let Some(individual) = individuals.get_mut(person.index()) {
        individual.link_family(family);
    }
}

//! Event blocks such as `1 MARR` or `1 BIRT` and their sub-lines.

use tracing::trace;

use super::tokenizer::Line;
use super::{Cursor, Phase, required_value};
use crate::error::GedcomError;
use crate::model::{Event, Field};

/// Parse the block opened by `opening`.
///
/// Direct `DATE` and `PLAC` children fill the fixed fields; every other
/// nested line becomes an opaque field that remembers its depth below the
/// opening line. Stops at the first line whose level is not deeper than the
/// opening line.
pub(crate) fn parse_event(cursor: &mut Cursor<'_>, opening: &Line) -> Result<Event, GedcomError> {
    let mut event = Event::new(opening.tag.as_str());
    let child_level = opening.level + 1;

    while let Some(line) = cursor.next_child(opening.level, "an event")? {
        match line.tag.as_str() {
            "DATE" if line.level == child_level => {
                event.date = required_value(&line, Phase::Record)?.to_string();
            }
            "PLAC" if line.level == child_level => {
                event.place = required_value(&line, Phase::Record)?.to_string();
            }
            _ => {
                let depth = line.level - opening.level;
                event.fields.push(Field::nested(line.tag, line.value, depth));
            }
        }
    }

    trace!(line = opening.line_no, %event, "parsed event");
    Ok(event)
}

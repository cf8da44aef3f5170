use std::fmt;

use super::field::Field;

/// Tags that open an event block inside a `FAM` record.
pub const FAMILY_EVENT_TAGS: &[&str] = &[
    "ANUL", "CENS", "DIV", "DIVF", "ENGA", "EVEN", "MARB", "MARC", "MARL", "MARR", "MARS",
];

/// Tags that open an event block inside an `INDI` record when individual
/// events are retained.
pub const INDIVIDUAL_EVENT_TAGS: &[&str] = &[
    "ADOP", "BAPM", "BARM", "BASM", "BIRT", "BLES", "BURI", "CENS", "CHR", "CHRA", "CONF", "CREM",
    "DEAT", "EMIG", "EVEN", "FCOM", "GRAD", "IMMI", "NATU", "ORDN", "PROB", "RETI", "WILL",
];

/// A dated, placed occurrence such as a marriage or a birth.
///
/// `date` and `place` are kept verbatim; GEDCOM date phrases (`ABT 1850`,
/// `BET 1900 AND 1910`) are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub event_type: String,
    pub date: String,
    pub place: String,
    pub fields: Vec<Field>,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if `tag` opens a family event.
    #[must_use]
    pub fn is_family_event_tag(tag: &str) -> bool {
        FAMILY_EVENT_TAGS.contains(&tag)
    }

    /// Returns `true` if `tag` opens an individual event.
    #[must_use]
    pub fn is_individual_event_tag(tag: &str) -> bool {
        INDIVIDUAL_EVENT_TAGS.contains(&tag)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_type)?;
        if !self.date.is_empty() {
            write!(f, " {}", self.date)?;
        }
        if !self.place.is_empty() {
            write!(f, " at {}", self.place)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marriage_variants_are_family_events() {
        for tag in ["MARR", "MARS", "MARL", "MARC", "MARB", "ENGA", "DIV", "DIVF", "ANUL"] {
            assert!(Event::is_family_event_tag(tag), "{tag}");
        }
        assert!(!Event::is_family_event_tag("BIRT"));
        assert!(!Event::is_family_event_tag("HUSB"));
    }

    #[test]
    fn birth_and_death_are_individual_events() {
        assert!(Event::is_individual_event_tag("BIRT"));
        assert!(Event::is_individual_event_tag("DEAT"));
        assert!(!Event::is_individual_event_tag("MARR"));
        assert!(!Event::is_individual_event_tag("NAME"));
    }

    #[test]
    fn display_skips_empty_parts() {
        let mut event = Event::new("MARR");
        assert_eq!(event.to_string(), "MARR");
        event.date = "12 JUN 1901".into();
        event.place = "Leeds".into();
        assert_eq!(event.to_string(), "MARR 12 JUN 1901 at Leeds");
    }
}

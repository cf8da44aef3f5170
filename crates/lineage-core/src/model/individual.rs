use std::cmp::Ordering;
use std::fmt;

use super::event::Event;
use super::family::FamilyId;
use super::field::Field;

/// Handle of an [`Individual`] inside its owning
/// [`Document`](super::Document).
///
/// Handles are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndividualId(pub(crate) usize);

impl IndividualId {
    /// Position of the person in [`Document::individuals`](super::Document::individuals).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// A person.
///
/// The family set is maintained by the parser: a person lists every family in
/// which they appear as husband, wife or child, each at most once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Individual {
    given_name: String,
    surname: String,
    events: Vec<Event>,
    fields: Vec<Field>,
    families: Vec<FamilyId>,
}

impl Individual {
    /// A person with no events, fields or family links.
    pub fn new(given_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            surname: surname.into(),
            ..Self::default()
        }
    }

    /// Split a `NAME` value of the form `given /surname/`.
    ///
    /// The given name is the trimmed text before the first slash and the
    /// surname the trimmed text between the first and second slash. Either
    /// part is empty when absent.
    #[must_use]
    pub fn from_name_value(value: &str) -> Self {
        let (given, surname) = split_name(value);
        Self::new(given, surname)
    }

    #[must_use]
    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Every family this person belongs to, in the order the links were made.
    #[must_use]
    pub fn families(&self) -> &[FamilyId] {
        &self.families
    }

    /// `given surname`, collapsing the gap when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.given_name.is_empty(), self.surname.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.surname),
            (false, true) => self.given_name.clone(),
            (true, false) => self.surname.clone(),
            (true, true) => String::new(),
        }
    }

    /// Ordering used for generation buckets: surname, then given name.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.surname
            .cmp(&other.surname)
            .then_with(|| self.given_name.cmp(&other.given_name))
    }

    pub(crate) fn set_names(&mut self, given_name: String, surname: String) {
        self.given_name = given_name;
        self.surname = surname;
    }

    pub(crate) fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Record membership in `family`. Repeated links are ignored.
    pub(crate) fn link_family(&mut self, family: FamilyId) {
        if !self.families.contains(&family) {
            self.families.push(family);
        }
    }

    pub(crate) fn clear_families(&mut self) {
        self.families.clear();
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

pub(crate) fn split_name(value: &str) -> (String, String) {
    match value.split_once('/') {
        Some((given, rest)) => {
            let surname = rest.split('/').next().unwrap_or_default();
            (given.trim().to_string(), surname.trim().to_string())
        }
        None => (value.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_with_given_and_surname() {
        let person = Individual::from_name_value("John /Smith/");
        assert_eq!(person.given_name(), "John");
        assert_eq!(person.surname(), "Smith");
        assert_eq!(person.full_name(), "John Smith");
    }

    #[test]
    fn multi_word_given_name_is_kept_whole() {
        let person = Individual::from_name_value("Mary Ann /Jones/");
        assert_eq!(person.given_name(), "Mary Ann");
        assert_eq!(person.surname(), "Jones");
    }

    #[test]
    fn surname_only() {
        let person = Individual::from_name_value("/Doe/");
        assert_eq!(person.given_name(), "");
        assert_eq!(person.surname(), "Doe");
        assert_eq!(person.full_name(), "Doe");
    }

    #[test]
    fn given_only() {
        let person = Individual::from_name_value("Cher");
        assert_eq!(person.given_name(), "Cher");
        assert_eq!(person.surname(), "");
    }

    #[test]
    fn unterminated_surname() {
        let person = Individual::from_name_value("Ann /Lee");
        assert_eq!(person.given_name(), "Ann");
        assert_eq!(person.surname(), "Lee");
    }

    #[test]
    fn empty_name() {
        let person = Individual::from_name_value("");
        assert_eq!(person.full_name(), "");
    }

    #[test]
    fn orders_by_surname_then_given() {
        let a = Individual::new("Zed", "Adams");
        let b = Individual::new("Amy", "Smith");
        let c = Individual::new("Bob", "Smith");
        assert_eq!(a.cmp_by_name(&b), Ordering::Less);
        assert_eq!(b.cmp_by_name(&c), Ordering::Less);
        assert_eq!(c.cmp_by_name(&c.clone()), Ordering::Equal);
    }

    #[test]
    fn family_links_are_a_set() {
        let mut person = Individual::new("A", "B");
        person.link_family(FamilyId(0));
        person.link_family(FamilyId(1));
        person.link_family(FamilyId(0));
        assert_eq!(person.families(), &[FamilyId(0), FamilyId(1)]);
    }
}

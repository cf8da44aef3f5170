use std::fmt;

use super::event::Event;
use super::field::Field;
use super::individual::IndividualId;

/// Handle of a [`Family`] inside its owning [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(pub(crate) usize);

impl FamilyId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// A family unit: up to two spouses and their children.
///
/// Spouse and child slots are non-owning handles into the same document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Family {
    husband: Option<IndividualId>,
    wife: Option<IndividualId>,
    children: Vec<IndividualId>,
    events: Vec<Event>,
    fields: Vec<Field>,
}

impl Family {
    #[must_use]
    pub const fn husband(&self) -> Option<IndividualId> {
        self.husband
    }

    #[must_use]
    pub const fn wife(&self) -> Option<IndividualId> {
        self.wife
    }

    #[must_use]
    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Husband then wife, skipping empty slots.
    pub fn spouses(&self) -> impl Iterator<Item = IndividualId> {
        self.husband.into_iter().chain(self.wife)
    }

    /// `true` if `id` fills the husband or wife slot.
    #[must_use]
    pub fn is_spouse(&self, id: IndividualId) -> bool {
        self.husband == Some(id) || self.wife == Some(id)
    }

    #[must_use]
    pub fn has_child(&self, id: IndividualId) -> bool {
        self.children.contains(&id)
    }

    /// `true` if `id` appears in any slot.
    #[must_use]
    pub fn has_member(&self, id: IndividualId) -> bool {
        self.is_spouse(id) || self.has_child(id)
    }

    /// Every referenced person: spouses first, then children.
    pub fn members(&self) -> impl Iterator<Item = IndividualId> + '_ {
        self.spouses().chain(self.children.iter().copied())
    }

    pub(crate) const fn set_husband(&mut self, id: IndividualId) {
        self.husband = Some(id);
    }

    pub(crate) const fn set_wife(&mut self, id: IndividualId) {
        self.wife = Some(id);
    }

    pub(crate) fn push_child(&mut self, id: IndividualId) {
        self.children.push(id);
    }

    pub(crate) fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles() {
        let mut family = Family::default();
        family.set_husband(IndividualId(0));
        family.set_wife(IndividualId(1));
        family.push_child(IndividualId(2));

        assert!(family.is_spouse(IndividualId(0)));
        assert!(family.is_spouse(IndividualId(1)));
        assert!(!family.is_spouse(IndividualId(2)));
        assert!(family.has_child(IndividualId(2)));
        assert!(!family.has_member(IndividualId(3)));
        assert_eq!(
            family.members().collect::<Vec<_>>(),
            vec![IndividualId(0), IndividualId(1), IndividualId(2)]
        );
    }

    #[test]
    fn single_parent_family() {
        let mut family = Family::default();
        family.set_wife(IndividualId(4));
        assert_eq!(family.husband(), None);
        assert_eq!(family.spouses().collect::<Vec<_>>(), vec![IndividualId(4)]);
    }
}

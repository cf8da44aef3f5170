//! The root of a parsed family graph.
//!
//! A [`Document`] owns every [`Individual`] and [`Family`] in two arenas and
//! hands out [`IndividualId`] / [`FamilyId`] handles into them. Once returned
//! from the parser it is immutable; [`Document::with_individual`] builds a new
//! graph instead of mutating the old one.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::family::{Family, FamilyId};
use super::field::Field;
use super::individual::{Individual, IndividualId};
use crate::error::{ErrorKind, GedcomError};

/// Cross-reference used for the submitter of documents built in code.
pub const DEFAULT_SUBMITTER_XREF: &str = "@SUBM1@";

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Character set declared by the header's `CHAR` line.
///
/// Only the declaration is recorded; text is never transcoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "ANSEL")]
    Ansel,
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UNICODE")]
    Unicode,
    #[serde(rename = "ASCII")]
    Ascii,
}

impl Encoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ansel => "ANSEL",
            Self::Utf8 => "UTF-8",
            Self::Unicode => "UNICODE",
            Self::Ascii => "ASCII",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `CHAR` value names an unsupported character set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid encoding: '{got}'")]
pub struct ParseEncodingError {
    pub got: String,
}

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANSEL" => Ok(Self::Ansel),
            "UTF-8" => Ok(Self::Utf8),
            "UNICODE" => Ok(Self::Unicode),
            "ASCII" => Ok(Self::Ascii),
            _ => Err(ParseEncodingError { got: s.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// Header & submitter
// ---------------------------------------------------------------------------

/// Document metadata from the `HEAD` record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    pub source: String,
    pub version: f64,
    pub encoding: Encoding,
    /// Cross-reference of the submitter record, e.g. `@SUBM1@`.
    pub submitter_xref: String,
    pub fields: Vec<Field>,
}

/// The person or organization that produced the file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Submitter {
    pub name: String,
    pub address: Option<String>,
    pub fields: Vec<Field>,
}

impl Submitter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A complete, validated family graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    header: Header,
    submitter: Submitter,
    individuals: Vec<Individual>,
    families: Vec<Family>,
}

impl Document {
    /// An empty document with the given header values and submitter.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidHeader`] if `source` is blank or
    /// `version` is not a positive number.
    pub fn new(
        source: impl Into<String>,
        version: f64,
        encoding: Encoding,
        submitter: Submitter,
    ) -> Result<Self, GedcomError> {
        let header = Header {
            source: source.into(),
            version,
            encoding,
            submitter_xref: DEFAULT_SUBMITTER_XREF.to_string(),
            fields: Vec::new(),
        };
        check_header(&header)?;
        Ok(Self::from_parts(header, submitter, Vec::new(), Vec::new()))
    }

    pub(crate) const fn from_parts(
        header: Header,
        submitter: Submitter,
        individuals: Vec<Individual>,
        families: Vec<Family>,
    ) -> Self {
        Self {
            header,
            submitter,
            individuals,
            families,
        }
    }

    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub const fn submitter(&self) -> &Submitter {
        &self.submitter
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    #[must_use]
    pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id.0)
    }

    #[must_use]
    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(id.0)
    }

    /// Every individual with its handle, in source order.
    pub fn iter_individuals(&self) -> impl Iterator<Item = (IndividualId, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .map(|(idx, person)| (IndividualId(idx), person))
    }

    /// Every family with its handle, in source order.
    pub fn iter_families(&self) -> impl Iterator<Item = (FamilyId, &Family)> {
        self.families
            .iter()
            .enumerate()
            .map(|(idx, family)| (FamilyId(idx), family))
    }

    /// Handle of the first individual for which `predicate` returns `true`.
    pub fn find_person<F>(&self, mut predicate: F) -> Option<IndividualId>
    where
        F: FnMut(&Individual) -> bool,
    {
        self.individuals
            .iter()
            .position(|person| predicate(person))
            .map(IndividualId)
    }

    /// Handle of the first individual with exactly this given name and
    /// surname.
    #[must_use]
    pub fn find_by_name(&self, given_name: &str, surname: &str) -> Option<IndividualId> {
        self.find_person(|person| person.given_name() == given_name && person.surname() == surname)
    }

    /// A new document equal to `self` plus `person` appended as an
    /// unattached individual.
    ///
    /// Any family links carried by `person` are dropped, since they would not
    /// be backed by a family in this graph.
    #[must_use]
    pub fn with_individual(&self, mut person: Individual) -> Self {
        person.clear_families();
        let mut next = self.clone();
        next.individuals.push(person);
        next
    }

    /// Re-check a finished graph.
    ///
    /// Header fields must be set, the submitter must be named, and every
    /// family edge must be in range and mirrored by the person's family set
    /// (and the reverse).
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidHeader`] for header problems and
    /// [`ErrorKind::InvalidRecord`] for submitter or edge problems. None of
    /// these carry a line number.
    pub fn validate(&self) -> Result<(), GedcomError> {
        check_header(&self.header)?;
        if self.header.submitter_xref.trim().is_empty() {
            return Err(GedcomError::new(
                ErrorKind::InvalidHeader,
                None,
                "header has no submitter reference",
            ));
        }
        if self.submitter.name.trim().is_empty() {
            return Err(GedcomError::new(
                ErrorKind::InvalidRecord,
                None,
                "submitter has no name",
            ));
        }

        for (fam_id, family) in self.iter_families() {
            for member in family.members() {
                let Some(person) = self.individual(member) else {
                    return Err(GedcomError::new(
                        ErrorKind::InvalidRecord,
                        None,
                        format!("family {fam_id} references missing individual {member}"),
                    ));
                };
                if !person.families().contains(&fam_id) {
                    return Err(GedcomError::new(
                        ErrorKind::InvalidRecord,
                        None,
                        format!("individual {member} does not link back to family {fam_id}"),
                    ));
                }
            }
        }

        for (person_id, person) in self.iter_individuals() {
            for &fam_id in person.families() {
                let linked = self
                    .family(fam_id)
                    .is_some_and(|family| family.has_member(person_id));
                if !linked {
                    return Err(GedcomError::new(
                        ErrorKind::InvalidRecord,
                        None,
                        format!(
                            "individual {person_id} lists family {fam_id} that does not include them"
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    pub(crate) fn name_of(&self, id: Option<IndividualId>) -> String {
        id.and_then(|id| self.individual(id))
            .map_or_else(|| "-".to_string(), Individual::full_name)
    }
}

fn check_header(header: &Header) -> Result<(), GedcomError> {
    if header.source.trim().is_empty() {
        return Err(GedcomError::new(
            ErrorKind::InvalidHeader,
            None,
            "header has no source",
        ));
    }
    if !(header.version.is_finite() && header.version > 0.0) {
        return Err(GedcomError::new(
            ErrorKind::InvalidHeader,
            None,
            format!("header version {} is not a positive number", header.version),
        ));
    }
    Ok(())
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source:     {}", self.header.source)?;
        writeln!(f, "Version:    {}", self.header.version)?;
        writeln!(f, "Encoding:   {}", self.header.encoding)?;
        write!(f, "Submitter:  {}", self.submitter.name)?;
        if let Some(address) = &self.submitter.address {
            write!(f, " ({address})")?;
        }
        writeln!(f)?;

        writeln!(f, "Individuals ({}):", self.individuals.len())?;
        for (id, person) in self.iter_individuals() {
            writeln!(f, "  {id:<5} {}", person.full_name())?;
            for event in person.events() {
                writeln!(f, "        {event}")?;
            }
        }

        writeln!(f, "Families ({}):", self.families.len())?;
        for (id, family) in self.iter_families() {
            writeln!(
                f,
                "  {id:<5} husband: {}, wife: {}",
                self.name_of(family.husband()),
                self.name_of(family.wife())
            )?;
            for event in family.events() {
                writeln!(f, "        {event}")?;
            }
            for &child in family.children() {
                writeln!(f, "        child: {}", self.name_of(Some(child)))?;
            }
        }
        Ok(())
    }
}

//! JSON projections of a document and its people.
//!
//! Output uses camelCase keys:
//!
//! ```json
//! {"source":"PAF","version":5.5,"encoding":"ANSEL","submitterName":"Ann",
//!  "submitterAddress":null,"individualCount":3,"familyCount":1}
//! {"givenName":"Amy","surname":"Smith"}
//! ```
//!
//! [`document_from_json`] goes the other way and builds a header-only
//! document, for creating new files.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, GedcomError};
use crate::graph::Generations;
use crate::model::{Document, Encoding, Individual, Submitter};

/// Header, submitter and entity counts of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub source: String,
    pub version: f64,
    pub encoding: Encoding,
    pub submitter_name: String,
    pub submitter_address: Option<String>,
    pub individual_count: usize,
    pub family_count: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        let header = doc.header();
        let submitter = doc.submitter();
        Self {
            source: header.source.clone(),
            version: header.version,
            encoding: header.encoding,
            submitter_name: submitter.name.clone(),
            submitter_address: submitter.address.clone(),
            individual_count: doc.individuals().len(),
            family_count: doc.families().len(),
        }
    }
}

/// A person's names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub surname: String,
}

impl From<&Individual> for PersonSummary {
    fn from(person: &Individual) -> Self {
        Self {
            given_name: person.given_name().to_string(),
            surname: person.surname().to_string(),
        }
    }
}

impl From<PersonSummary> for Individual {
    fn from(summary: PersonSummary) -> Self {
        Self::new(summary.given_name, summary.surname)
    }
}

/// # Errors
///
/// Only if serialization itself fails.
pub fn document_to_json(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(&DocumentSummary::from(doc))
}

/// # Errors
///
/// Only if serialization itself fails.
pub fn individual_to_json(person: &Individual) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PersonSummary::from(person))
}

/// A JSON array of person objects.
///
/// # Errors
///
/// Only if serialization itself fails.
pub fn individuals_to_json(people: &[Individual]) -> Result<String, serde_json::Error> {
    let summaries: Vec<PersonSummary> = people.iter().map(PersonSummary::from).collect();
    serde_json::to_string(&summaries)
}

/// A JSON array of generation arrays.
///
/// # Errors
///
/// Only if serialization itself fails.
pub fn generations_to_json(generations: &Generations) -> Result<String, serde_json::Error> {
    let summaries: Vec<Vec<PersonSummary>> = generations
        .iter()
        .map(|bucket| bucket.iter().map(PersonSummary::from).collect())
        .collect();
    serde_json::to_string(&summaries)
}

/// Build an unattached [`Individual`] from `{"givenName", "surname"}`.
/// Missing keys become empty names.
///
/// # Errors
///
/// [`ErrorKind::InvalidRecord`] if the text is not a JSON object of that
/// shape.
pub fn individual_from_json(text: &str) -> Result<Individual, GedcomError> {
    serde_json::from_str::<PersonSummary>(text)
        .map(Individual::from)
        .map_err(|err| {
            GedcomError::new(ErrorKind::InvalidRecord, None, format!("bad person JSON: {err}"))
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewDocument {
    source: String,
    #[serde(alias = "version")]
    gedc_version: VersionValue,
    encoding: String,
    #[serde(alias = "submitterName")]
    sub_name: String,
    #[serde(default, alias = "submitterAddress")]
    sub_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionValue {
    Number(f64),
    Text(String),
}

impl VersionValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(text) => crate::parser::header::parse_version(text),
        }
    }
}

/// Build a document with a header and submitter but no people, from
/// `{"source", "gedcVersion", "encoding", "subName", "subAddress"}`.
///
/// `version`, `submitterName` and `submitterAddress` are accepted as
/// aliases, and the version may be a number or a string.
///
/// # Errors
///
/// [`ErrorKind::InvalidDocument`] for malformed JSON, a missing key or a
/// blank submitter name; [`ErrorKind::InvalidHeader`] for an unsupported
/// encoding, blank source or non-positive version.
pub fn document_from_json(text: &str) -> Result<Document, GedcomError> {
    let new_doc: NewDocument = serde_json::from_str(text)
        .map_err(|err| GedcomError::invalid_document(None, format!("bad document JSON: {err}")))?;

    if new_doc.sub_name.trim().is_empty() {
        return Err(GedcomError::invalid_document(None, "submitter name is required"));
    }
    let encoding = new_doc
        .encoding
        .parse::<Encoding>()
        .map_err(|err| GedcomError::new(ErrorKind::InvalidHeader, None, err.to_string()))?;
    let version = new_doc.gedc_version.as_f64().unwrap_or_default();

    let mut submitter = Submitter::new(new_doc.sub_name.trim());
    if let Some(address) = new_doc.sub_address.filter(|a| !a.trim().is_empty()) {
        submitter = submitter.with_address(address);
    }

    Document::new(new_doc.source.trim(), version, encoding, submitter)
}

//! lineage-core library.
//!
//! Parses GEDCOM family-tree files into an immutable [`Document`] and answers
//! generation-bounded ancestor and descendant queries over it.
//!
//! ```no_run
//! use lineage_core::{graph, parser};
//!
//! let doc = parser::parse_file("family.ged")?;
//! if let Some(john) = doc.find_by_name("John", "Smith") {
//!     for (depth, generation) in graph::descendants(&doc, john, 2).iter().enumerate() {
//!         println!("generation {}: {} people", depth + 1, generation.len());
//!     }
//! }
//! # Ok::<(), lineage_core::GedcomError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod json;
pub mod model;
pub mod parser;
pub mod writer;

pub use error::{ErrorKind, GedcomError};
pub use model::{Document, Encoding, Family, FamilyId, Individual, IndividualId, Submitter};
pub use parser::{parse_file, parse_file_with, parse_str, parse_str_with};

//! In-memory family graph.
//!
//! People and families live in two arenas owned by [`Document`]; every
//! cross-link is a handle ([`IndividualId`], [`FamilyId`]) into those arenas.

pub mod document;
pub mod event;
pub mod family;
pub mod field;
pub mod individual;

pub use document::{Document, Encoding, Header, ParseEncodingError, Submitter};
pub use event::Event;
pub use family::{Family, FamilyId};
pub use field::Field;
pub use individual::{Individual, IndividualId};

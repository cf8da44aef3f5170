//! Queries over a finished [`Document`](crate::model::Document).
//!
//! - [`traversal`]: generation-bounded ancestor and descendant search.

pub mod traversal;

pub use traversal::{Direction, Generations, all_descendants, ancestors, descendants, generations};

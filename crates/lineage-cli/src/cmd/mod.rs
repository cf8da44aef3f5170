pub mod add;
pub mod completions;
pub mod create;
pub mod generations;
pub mod individuals;
pub mod summary;
pub mod validate;
pub mod write;

use crate::output::{CliError, OutputMode, render_error};
use lineage_core::config::ParserConfig;
use lineage_core::json::PersonSummary;
use lineage_core::{Document, GedcomError, Individual, parse_file_with};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Parse `path`, rendering any failure before handing it back as an
/// `anyhow` error.
pub fn load_document(
    path: &Path,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<Document> {
    match parse_file_with(path, config) {
        Ok(doc) => {
            debug!(
                path = %path.display(),
                individuals = doc.individuals().len(),
                families = doc.families().len(),
                "loaded document"
            );
            Ok(doc)
        }
        Err(err) => fail(output, &err),
    }
}

/// Render `err` and bail with its short form.
pub fn fail<T>(output: OutputMode, err: &GedcomError) -> anyhow::Result<T> {
    render_error(output, &CliError::from(err))?;
    anyhow::bail!("{err}")
}

/// A person row as printed by `individuals`, `descendants` and `ancestors`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PersonRow(pub PersonSummary);

impl From<&Individual> for PersonRow {
    fn from(person: &Individual) -> Self {
        Self(PersonSummary::from(person))
    }
}

impl PersonRow {
    pub fn full_name(&self) -> String {
        Individual::from(self.0.clone()).full_name()
    }
}

impl crate::output::Renderable for PersonRow {
    fn render_human(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(w, "  {}", self.full_name())
    }

    fn render_json(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        serde_json::to_writer(&mut *w, &self.0).map_err(std::io::Error::other)
    }

    fn render_table(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(w, "{}\t{}", self.0.given_name, self.0.surname)
    }

    fn table_headers() -> &'static [&'static str] {
        &["GIVEN", "SURNAME"]
    }
}

//! `lin add-individual`: add an unattached person to a file.

use crate::cmd::write::save;
use crate::cmd::{PersonRow, fail, load_document};
use crate::output::{OutputMode, render};
use clap::Args;
use lineage_core::config::ParserConfig;
use lineage_core::json::individual_from_json;
use lineage_core::Individual;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// GEDCOM file to extend.
    pub file: PathBuf,

    /// Given name of the new person.
    #[arg(long, required_unless_present = "person_json")]
    pub given: Option<String>,

    /// Surname of the new person.
    #[arg(long, required_unless_present = "person_json")]
    pub surname: Option<String>,

    /// The new person as `{"givenName": .., "surname": ..}`.
    #[arg(long, conflicts_with_all = ["given", "surname"])]
    pub person_json: Option<String>,

    /// Write the result here instead of replacing FILE.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct AddResult {
    pub output: String,
    pub person: PersonRow,
    pub individuals: usize,
}

/// Execute `lin add-individual <file>`.
///
/// The file is parsed, rebuilt with the new person, and written in
/// canonical form.
///
/// # Errors
///
/// Returns an error if the file fails to parse, the person JSON is
/// malformed, or the result cannot be written.
pub fn run_add(args: &AddArgs, config: &ParserConfig, output: OutputMode) -> anyhow::Result<()> {
    let doc = load_document(&args.file, config, output)?;

    let person = match &args.person_json {
        Some(text) => match individual_from_json(text) {
            Ok(person) => person,
            Err(err) => return fail(output, &err),
        },
        None => Individual::new(
            args.given.clone().unwrap_or_default(),
            args.surname.clone().unwrap_or_default(),
        ),
    };
    let row = PersonRow::from(&person);

    let updated = doc.with_individual(person);
    let destination = args.output.as_ref().unwrap_or(&args.file);
    if let Err(err) = save(&updated, destination, config.max_line_length) {
        return fail(output, &err);
    }
    info!(output = %destination.display(), name = %row.full_name(), "individual added");

    let result = AddResult {
        output: destination.display().to_string(),
        person: row,
        individuals: updated.individuals().len(),
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "added {} to {} ({} individuals)",
            r.person.full_name(),
            r.output,
            r.individuals
        )
    })
}

//! `lin individuals`: list everyone in a file.

use crate::cmd::{PersonRow, load_document};
use crate::output::{OutputMode, pretty_section, render_list};
use clap::Args;
use lineage_core::config::ParserConfig;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct IndividualsArgs {
    /// GEDCOM file to read.
    pub file: PathBuf,

    /// Sort by surname, then given name, instead of file order.
    #[arg(long)]
    pub sorted: bool,
}

/// Execute `lin individuals <file>`.
///
/// # Errors
///
/// Returns an error if the file fails to parse or output fails.
pub fn run_individuals(
    args: &IndividualsArgs,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let doc = load_document(&args.file, config, output)?;

    let mut people: Vec<_> = doc.individuals().iter().collect();
    if args.sorted {
        people.sort_by(|a, b| a.cmp_by_name(b));
    }
    let rows: Vec<PersonRow> = people.into_iter().map(PersonRow::from).collect();

    if output == OutputMode::Pretty {
        let stdout = io::stdout();
        pretty_section(
            &mut stdout.lock(),
            &format!("Individuals ({})", rows.len()),
        )?;
    }
    render_list(&rows, output)?;
    Ok(())
}

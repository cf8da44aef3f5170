//! `lin descendants` / `lin ancestors`: generation-bounded queries.

use crate::cmd::{PersonRow, load_document};
use crate::output::{CliError, OutputMode, Renderable, pretty_section, render_error, render_mode};
use clap::Args;
use lineage_core::config::ParserConfig;
use lineage_core::graph::{self, Direction};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// Arguments shared by `lin descendants` and `lin ancestors`.
#[derive(Args, Debug)]
pub struct GenerationsArgs {
    /// GEDCOM file to read.
    pub file: PathBuf,

    /// Given name of the starting person.
    #[arg(long)]
    pub given: String,

    /// Surname of the starting person.
    #[arg(long)]
    pub surname: String,

    /// How many generations to walk; 0 walks them all.
    #[arg(long, short = 'n', default_value_t = 0)]
    pub generations: usize,
}

/// Generation buckets as printed; serializes as an array of arrays.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct GenerationRows(Vec<Vec<PersonRow>>);

/// Execute `lin descendants` or `lin ancestors`.
///
/// # Errors
///
/// Returns an error if the file fails to parse, nobody matches the given
/// name, or output fails.
pub fn run_generations(
    args: &GenerationsArgs,
    direction: Direction,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let doc = load_document(&args.file, config, output)?;

    let Some(start) = doc.find_by_name(&args.given, &args.surname) else {
        let err = CliError::with_details(
            format!("no individual named {} {}", args.given, args.surname),
            "names are matched exactly; run `lin individuals` to list them",
            "person_not_found",
        );
        render_error(output, &err)?;
        anyhow::bail!(err.message);
    };

    let buckets = graph::generations(&doc, start, args.generations, direction);
    debug!(
        start = %start,
        ?direction,
        generations = buckets.len(),
        "generation query finished"
    );

    let rows = GenerationRows(
        buckets
            .iter()
            .map(|bucket| bucket.iter().map(PersonRow::from).collect())
            .collect(),
    );
    let heading = match direction {
        Direction::Descendants => "Descendants",
        Direction::Ancestors => "Ancestors",
    };

    render_mode(output, &rows, render_text, |rows, w| {
        render_pretty(rows, heading, w)
    })
}

fn render_text(rows: &GenerationRows, w: &mut dyn Write) -> io::Result<()> {
    for (depth, bucket) in rows.0.iter().enumerate() {
        for person in bucket {
            write!(w, "{}\t", depth + 1)?;
            person.render_table(w)?;
        }
    }
    Ok(())
}

fn render_pretty(rows: &GenerationRows, heading: &str, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, heading)?;
    if rows.0.is_empty() {
        writeln!(w, "(none)")?;
    }
    for (depth, bucket) in rows.0.iter().enumerate() {
        writeln!(w, "Generation {}", depth + 1)?;
        for person in bucket {
            person.render_human(w)?;
        }
    }
    Ok(())
}

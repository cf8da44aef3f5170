//! `lin write`: parse a file and write it back out in canonical form.

use crate::cmd::{fail, load_document};
use crate::output::{OutputMode, render};
use clap::Args;
use lineage_core::{Document, GedcomError};
use lineage_core::config::ParserConfig;
use lineage_core::writer::write_document_with;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// GEDCOM file to read.
    pub input: PathBuf,

    /// Destination file; replaced if it exists.
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct WriteResult {
    pub input: String,
    pub output: String,
    pub individuals: usize,
    pub families: usize,
}

/// Write `doc` to `path` with `max_line_length`, creating or truncating it.
pub fn save(
    doc: &Document,
    path: &Path,
    max_line_length: usize,
) -> Result<(), GedcomError> {
    let file = File::create(path).map_err(|err| {
        GedcomError::write_error(format!("failed to create {}: {err}", path.display()))
    })?;
    let mut out = BufWriter::new(file);
    write_document_with(doc, &mut out, max_line_length)
}

/// Execute `lin write <input> <output>`.
///
/// # Errors
///
/// Returns an error if the input fails to parse or the output cannot be
/// written.
pub fn run_write(
    args: &WriteArgs,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let doc = load_document(&args.input, config, output)?;
    if let Err(err) = save(&doc, &args.output, config.max_line_length) {
        return fail(output, &err);
    }
    info!(output = %args.output.display(), "normalized document written");

    let result = WriteResult {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        individuals: doc.individuals().len(),
        families: doc.families().len(),
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "wrote {} ({} individuals, {} families)",
            r.output, r.individuals, r.families
        )
    })
}

//! `lin create`: start a new, empty GEDCOM file.

use crate::cmd::fail;
use crate::cmd::write::save;
use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use lineage_core::config::ParserConfig;
use lineage_core::{Document, Encoding, Submitter};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// File to create; replaced if it exists.
    pub output: PathBuf,

    /// Submitter name.
    #[arg(long)]
    pub submitter: String,

    /// Submitter address.
    #[arg(long)]
    pub address: Option<String>,

    /// Value of the header SOUR line.
    #[arg(long, default_value = "lineage")]
    pub source: String,

    /// GEDCOM version recorded in the header.
    #[arg(long, default_value_t = 5.5)]
    pub version: f64,

    /// Declared character set: ANSEL, UTF-8, UNICODE or ASCII.
    #[arg(long, default_value = "ANSEL")]
    pub encoding: Encoding,
}

#[derive(Debug, Serialize)]
pub struct CreateResult {
    pub output: String,
    pub source: String,
    pub submitter: String,
}

/// Execute `lin create <output>`.
///
/// # Errors
///
/// Returns an error if the header values are invalid or the file cannot be
/// written.
pub fn run_create(
    args: &CreateArgs,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    if args.submitter.trim().is_empty() {
        let err = CliError::with_details(
            "submitter name is required",
            "pass --submitter \"Your Name\"",
            "missing_submitter",
        );
        render_error(output, &err)?;
        anyhow::bail!(err.message);
    }

    let mut submitter = Submitter::new(args.submitter.trim());
    if let Some(address) = args.address.as_deref().filter(|a| !a.trim().is_empty()) {
        submitter = submitter.with_address(address);
    }

    let doc = match Document::new(args.source.trim(), args.version, args.encoding, submitter) {
        Ok(doc) => doc,
        Err(err) => return fail(output, &err),
    };
    if let Err(err) = save(&doc, &args.output, config.max_line_length) {
        return fail(output, &err);
    }

    let result = CreateResult {
        output: args.output.display().to_string(),
        source: doc.header().source.clone(),
        submitter: doc.submitter().name.clone(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "created {}", r.output)
    })
}

//! `lin summary`: header, submitter and counts for one file.

use crate::cmd::load_document;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use lineage_core::config::ParserConfig;
use lineage_core::json::DocumentSummary;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// GEDCOM file to read.
    pub file: PathBuf,

    /// Print every individual and family, not just the counts.
    #[arg(long)]
    pub full: bool,
}

/// Execute `lin summary <file>`.
///
/// # Errors
///
/// Returns an error if the file fails to parse or output fails.
pub fn run_summary(
    args: &SummaryArgs,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let doc = load_document(&args.file, config, output)?;

    if args.full && !output.is_json() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{doc}")?;
        return Ok(());
    }

    let summary = DocumentSummary::from(&doc);
    render_mode(output, &summary, render_text, render_pretty)
}

fn render_text(summary: &DocumentSummary, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "source\t{}", summary.source)?;
    writeln!(w, "version\t{}", summary.version)?;
    writeln!(w, "encoding\t{}", summary.encoding)?;
    writeln!(w, "submitter\t{}", summary.submitter_name)?;
    if let Some(address) = &summary.submitter_address {
        writeln!(w, "address\t{address}")?;
    }
    writeln!(w, "individuals\t{}", summary.individual_count)?;
    writeln!(w, "families\t{}", summary.family_count)
}

fn render_pretty(summary: &DocumentSummary, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Document")?;
    pretty_kv(w, "Source", &summary.source)?;
    pretty_kv(w, "Version", summary.version.to_string())?;
    pretty_kv(w, "Encoding", summary.encoding.as_str())?;
    pretty_kv(w, "Submitter", &summary.submitter_name)?;
    if let Some(address) = &summary.submitter_address {
        pretty_kv(w, "Address", address)?;
    }
    pretty_kv(w, "People", summary.individual_count.to_string())?;
    pretty_kv(w, "Families", summary.family_count.to_string())
}

//! `lin validate`: check a batch of files and report OK / NOTOK for each.
//!
//! A file passes when it parses and the resulting graph is consistent
//! (`Document::validate`). Every file is checked even after a failure; the
//! command exits non-zero if any file failed.

use crate::output::{CliError, OutputMode, render};
use clap::Args;
use lineage_core::config::ParserConfig;
use lineage_core::{GedcomError, parse_file_with};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// GEDCOM files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub files: Vec<FileReport>,
    pub passed: usize,
    pub failed: usize,
}

/// Parse and validate one file.
pub fn check_file(path: &Path, config: &ParserConfig) -> Result<(), GedcomError> {
    let doc = parse_file_with(path, config)?;
    doc.validate()
}

/// Execute `lin validate <files>...`.
///
/// # Errors
///
/// Returns an error if any file fails, or output fails.
pub fn run_validate(
    args: &ValidateArgs,
    config: &ParserConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let files: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| {
            let result = check_file(path, config);
            debug!(path = %path.display(), ok = result.is_ok(), "validated file");
            FileReport {
                file: path.display().to_string(),
                ok: result.is_ok(),
                error: result.err().as_ref().map(CliError::from),
            }
        })
        .collect();

    let failed = files.iter().filter(|report| !report.ok).count();
    let report = ValidateReport {
        passed: files.len() - failed,
        failed,
        files,
    };
    info!(passed = report.passed, failed = report.failed, "validation finished");

    render(output, &report, render_human)?;
    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed validation", report.files.len());
    }
    Ok(())
}

fn render_human(report: &ValidateReport, w: &mut dyn Write) -> io::Result<()> {
    for file in &report.files {
        match &file.error {
            None => writeln!(w, "OK\t{}", file.file)?,
            Some(error) => writeln!(w, "NOTOK\t{}\t{}", file.file, error.message)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::ErrorKind;

    const GOOD: &str = "0 HEAD\n1 SOUR s\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n1 SUBM @U@\n0 @U@ SUBM\n1 NAME u\n0 TRLR\n";

    #[test]
    fn check_file_accepts_good_and_rejects_bad() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.ged");
        let bad = dir.path().join("bad.ged");
        std::fs::write(&good, GOOD).expect("write");
        std::fs::write(&bad, GOOD.replace("0 TRLR\n", "")).expect("write");

        let config = ParserConfig::default();
        check_file(&good, &config).expect("good file passes");
        let err = check_file(&bad, &config).expect_err("bad file fails");
        assert_eq!(err.kind(), ErrorKind::InvalidDocument);
    }

    #[test]
    fn human_report_marks_each_file() {
        let report = ValidateReport {
            files: vec![
                FileReport {
                    file: "a.ged".into(),
                    ok: true,
                    error: None,
                },
                FileReport {
                    file: "b.ged".into(),
                    ok: false,
                    error: Some(CliError::from(&GedcomError::invalid_record(4, "x"))),
                },
            ],
            passed: 1,
            failed: 1,
        };
        let mut buf = Vec::new();
        render_human(&report, &mut buf).expect("render");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "OK\ta.ged\nNOTOK\tb.ged\tInvalid record: line 4\n"
        );
    }
}

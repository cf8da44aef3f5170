#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use lineage_core::config::resolve_config;
use lineage_core::graph::Direction;
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "lin: GEDCOM family-tree toolkit",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Summarize a GEDCOM file",
        long_about = "Show the header, submitter and record counts of a GEDCOM file.",
        after_help = "EXAMPLES:\n    # Header and counts\n    lin summary family.ged\n\n    # Every person and family\n    lin summary family.ged --full\n\n    # Emit machine-readable output\n    lin summary family.ged --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Read",
        about = "List individuals",
        long_about = "List every individual in a GEDCOM file, in file order or sorted by name.",
        after_help = "EXAMPLES:\n    # File order\n    lin individuals family.ged\n\n    # Sorted by surname, then given name\n    lin individuals family.ged --sorted --json"
    )]
    Individuals(cmd::individuals::IndividualsArgs),

    #[command(
        next_help_heading = "Query",
        about = "List descendants by generation",
        long_about = "List the descendants of one person, grouped by generation. Each person appears once, in the closest generation.",
        after_help = "EXAMPLES:\n    # Children and grandchildren\n    lin descendants family.ged --given John --surname Smith -n 2\n\n    # Every generation\n    lin descendants family.ged --given John --surname Smith --json"
    )]
    Descendants(cmd::generations::GenerationsArgs),

    #[command(
        next_help_heading = "Query",
        about = "List ancestors by generation",
        long_about = "List the ancestors of one person, grouped by generation: parents first, then grandparents.",
        after_help = "EXAMPLES:\n    # Parents only\n    lin ancestors family.ged --given Amy --surname Smith -n 1\n\n    # Every generation\n    lin ancestors family.ged --given Amy --surname Smith --json"
    )]
    Ancestors(cmd::generations::GenerationsArgs),

    #[command(
        next_help_heading = "Check",
        about = "Validate GEDCOM files",
        long_about = "Parse and validate each file, printing OK or NOTOK per file. Exits non-zero if any file fails.",
        after_help = "EXAMPLES:\n    # Check a directory of files\n    lin validate trees/*.ged\n\n    # Emit machine-readable output\n    lin validate a.ged b.ged --json"
    )]
    Validate(cmd::validate::ValidateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Rewrite a file in canonical form",
        long_about = "Parse a GEDCOM file and write it back out with regenerated cross-references and canonical layout.",
        after_help = "EXAMPLES:\n    # Normalize a file\n    lin write family.ged family-clean.ged"
    )]
    Write(cmd::write::WriteArgs),

    #[command(
        next_help_heading = "Write",
        about = "Create an empty GEDCOM file",
        long_about = "Create a GEDCOM file holding only a header and submitter.",
        after_help = "EXAMPLES:\n    # Create a new tree\n    lin create tree.ged --submitter \"Ann Lee\"\n\n    # With an address and UTF-8 encoding\n    lin create tree.ged --submitter \"Ann Lee\" --address \"1 Main St\" --encoding UTF-8"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Add an individual to a file",
        long_about = "Add an individual with no family links to a GEDCOM file and rewrite it in canonical form.",
        after_help = "EXAMPLES:\n    # Add a person in place\n    lin add-individual tree.ged --given Amy --surname Smith\n\n    # From JSON, writing a new file\n    lin add-individual tree.ged --person-json '{\"givenName\":\"Amy\",\"surname\":\"Smith\"}' -o out.ged"
    )]
    AddIndividual(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        long_about = "Print a completion script for the given shell to stdout.",
        after_help = "EXAMPLES:\n    # Bash\n    lin completions bash > ~/.local/share/bash-completion/completions/lin"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINEAGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "lineage=debug,info"
        } else {
            "lineage=info,warn"
        })
    });

    let format = env::var("LINEAGE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.json)?;
    let output = OutputMode::from_resolved(&config.resolved_output);
    let parser = &config.project.parser;

    match cli.command {
        Commands::Summary(ref args) => cmd::summary::run_summary(args, parser, output),
        Commands::Individuals(ref args) => {
            cmd::individuals::run_individuals(args, parser, output)
        }
        Commands::Descendants(ref args) => {
            cmd::generations::run_generations(args, Direction::Descendants, parser, output)
        }
        Commands::Ancestors(ref args) => {
            cmd::generations::run_generations(args, Direction::Ancestors, parser, output)
        }
        Commands::Validate(ref args) => cmd::validate::run_validate(args, parser, output),
        Commands::Write(ref args) => cmd::write::run_write(args, parser, output),
        Commands::Create(ref args) => cmd::create::run_create(args, parser, output),
        Commands::AddIndividual(ref args) => cmd::add::run_add(args, parser, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

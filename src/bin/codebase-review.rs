//! codebase-review CLI - Concatenate a codebase into one review file.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use codebase_review::builder::Review;
use codebase_review::errors::ReviewError;
use codebase_review::filter::parse_exclude_list;
use codebase_review::output::format_excluded;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codebase-review")]
#[command(about = "Concatenate a codebase into a single annotated review file")]
#[command(version)]
#[command(after_help = "Example: codebase-review ./my-project --exclude test,docs")]
struct Cli {
    /// Directory to scan; the report is written to <DIRECTORY>/codebase_review.txt
    directory: PathBuf,

    /// Comma-separated directory names to skip at any depth
    #[arg(short, long, value_name = "DIRNAMES")]
    exclude: Option<String>,

    /// Log progress to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Usage errors exit 1 rather than clap's default 2.
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_logging(cli.verbose);

    let excluded = cli
        .exclude
        .as_deref()
        .map(parse_exclude_list)
        .unwrap_or_default();

    if let Err(e) = run(cli.directory, &excluded) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(directory: PathBuf, excluded: &[String]) -> Result<(), ReviewError> {
    let (path, result) = Review::new(directory).exclude(excluded).write()?;

    println!("Codebase contents have been written to {}", path.display());
    println!(
        "Excluded directories: {}",
        format_excluded(&result.summary.excluded)
    );

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! Command-line entry point: `calca INPUT OUTPUT`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use calca::{process_file, DriverOptions, ResolveContext};
use clap::Parser;

/// Annotate every `expression =>` query in a text file with its value.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Document to read
    input: PathBuf,

    /// Where to write the annotated document
    output: PathBuf,

    /// Maximum nesting of symbol expansions before reporting a cycle
    #[arg(long, default_value_t = calca::context::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum number of tokens a single query may expand to
    #[arg(long, default_value_t = calca::context::DEFAULT_MAX_TOKENS)]
    max_tokens: usize,

    /// Report failing lines and continue instead of stopping at the first one
    #[arg(long)]
    keep_going: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Returns whether every line succeeded.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let context = ResolveContext::with_max_depth(cli.max_depth)
        .with_max_tokens(cli.max_tokens)
        .with_trace(cli.verbose >= 3);
    let options = DriverOptions::with_context(context).keep_going(cli.keep_going);

    let summary = process_file(&cli.input, &cli.output, options)
        .with_context(|| format!("failed to process {}", cli.input.display()))?;

    for failure in &summary.failures {
        eprintln!("Error: {}", failure);
    }
    Ok(summary.is_success())
}

//! Plan generation for a selection within a Gherkin feature file.
//!
//! Plans are written to stdout; logs and notices go to stderr.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use stepgen::{Generation, SelectionHeuristic};
use tracing::debug;

use stepgen_cli::config::{CliConfig, LogLevel, OutputFormat};
use stepgen_cli::error::CliError;
use stepgen_cli::logging::init_logging;
use stepgen_cli::plan::{plan, select_lines};

/// Print what a step generator would produce for part of a feature file.
#[derive(Parser, Debug)]
#[command(name = "stepgen", version, about)]
struct Args {
    /// Feature file to read.
    feature: PathBuf,

    /// First selected line (1-based).
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// Last selected line (inclusive); defaults to the last line.
    #[arg(long)]
    end: Option<usize>,

    /// Plan format (text, json).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Selection heuristic (text, structure).
    #[arg(long)]
    heuristic: Option<SelectionHeuristic>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    if let Err(e) = run(&args, &config) {
        tracing::error!(error = %e, "generation failed");
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.heuristic, args.format))
}

fn run(args: &Args, config: &CliConfig) -> Result<(), CliError> {
    let source = std::fs::read_to_string(&args.feature)?;
    let selection = select_lines(&source, args.start, args.end);
    debug!(
        feature = %args.feature.display(),
        start = selection.start,
        end = selection.end,
        "planning selection"
    );

    let Generation { output, notices } = plan(&source, &selection, config)?;

    let mut stderr = std::io::stderr().lock();
    for notice in &notices {
        writeln!(stderr, "warning: {notice}")?;
    }

    let Some(output) = output else {
        debug!("nothing to generate");
        return Ok(());
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

//! score-review CLI entry point.

use clap::Parser;
use sr_common::{format_error_human, OutputFormat, StructuredError};
use sr_core::exit_codes::ExitCode;
use sr_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use sr_core::pipeline::{generate_report, ReviewOptions};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, error};

/// Compare scoring methods from evaluation results and report the best picks.
#[derive(Parser, Debug)]
#[command(name = "score-review")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Evaluation results CSV
    input: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Md)]
    format: OutputFormat,

    /// Analysis config file (overrides SCORE_REVIEW_CONFIG and XDG lookup)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Omit the decision guideline section
    #[arg(long)]
    no_guidelines: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            std::process::exit(code.as_i32());
        }
    };

    // JSON reports get JSONL logs on stderr.
    let cli_format = cli
        .format
        .is_machine_readable()
        .then_some(LogFormat::Jsonl);
    let cli_level = (cli.verbose > 0 || cli.quiet)
        .then(|| LogLevel::from_verbosity(cli.verbose, cli.quiet));
    init_logging(&LogConfig::from_env(cli_level, cli_format));

    let exit_code = run(&cli);
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> ExitCode {
    let opts = ReviewOptions {
        input: cli.input.clone(),
        config_path: cli.config.clone(),
        format: cli.format,
        title: cli.title.clone(),
        guidelines: !cli.no_guidelines,
        run_id: Some(generate_run_id()),
    };

    let result = generate_report(&opts).and_then(|report| write_report(cli, &report));
    match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            let code = ExitCode::from_error(&err);
            error!(code = err.code(), exit = %code, "{}", err);
            if cli.format.is_machine_readable() {
                eprintln!("{}", StructuredError::from(&err).to_json());
            } else {
                eprintln!("{}", format_error_human(&err, std::io::stderr().is_terminal()));
            }
            code
        }
    }
}

fn write_report(cli: &Cli, report: &str) -> sr_common::Result<()> {
    match &cli.output {
        Some(path) => {
            std::fs::write(path, report)?;
            debug!(path = %path.display(), bytes = report.len(), "Wrote report");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use suspect_cli::args::CliArgs;
use suspect_cli::reporter::Reporter;
use suspect_cli::{driver, tracing_config};

/// Input or configuration errors.
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_INVALID_INPUT)
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd)?;

    let color = !args.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(args.format, color);
    let output = reporter.render(&result.diagnostics)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the suspect binary.
#[derive(Parser, Debug)]
#[command(
    name = "suspect",
    version,
    about = "Flags container lookups whose argument can never match the element type"
)]
pub struct CliArgs {
    // ==================== Configuration ====================
    /// Path to suspect.json. Defaults to the nearest one in the current
    /// directory or its ancestors.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Report arguments that are only convertible to the element type.
    #[arg(
        long = "reportConvertible",
        alias = "report-convertible",
        action = ArgAction::Set,
        value_name = "BOOL"
    )]
    pub report_convertible: Option<bool>,

    // ==================== Output ====================
    /// Output format for findings.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored text output.
    #[arg(long = "noColor", alias = "no-color")]
    pub no_color: bool,

    // ==================== Inputs ====================
    /// Snapshot files, or directories searched for `*.snapshot.json`.
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

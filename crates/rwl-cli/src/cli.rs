//! CLI argument definitions for the decadal file reader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rwl",
    version,
    about = "Read and repair decadal tree-ring width files",
    long_about = "Read a decadal (Tucson-style) ring-width file into a year-by-core matrix.\n\n\
                  Structural problems are repaired or dropped, and every anomaly is\n\
                  reported with its error code and original line number."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a decadal file and report the corrected matrix and its anomalies.
    Read(ReadArgs),

    /// List the anomaly log codes.
    Codes,
}

#[derive(Parser)]
pub struct ReadArgs {
    /// Decadal file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the corrected matrix as CSV (year column, one column per core).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the anomaly log as JSON.
    #[arg(long = "log-json", value_name = "PATH")]
    pub log_json: Option<PathBuf>,

    /// Round values to the nearest integer.
    #[arg(long = "round")]
    pub round: bool,

    /// Treat zero values as missing rather than as measurements.
    #[arg(long = "zero-as-missing")]
    pub zero_as_missing: bool,

    /// Exit with status 1 when any anomaly was logged.
    #[arg(long = "fail-on-anomalies")]
    pub fail_on_anomalies: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

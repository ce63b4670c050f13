//! CLI argument definitions for the observation generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gen-obs",
    version,
    about = "Generate FHIR Observation documents from tabular lab results",
    long_about = "Convert a tab-delimited lab result file into one FHIR R4\n\
                  Observation JSON document per row.\n\n\
                  Display strings are resolved through a FHIR terminology\n\
                  server (CodeSystem/$lookup); lookup failures degrade to an\n\
                  omitted display and never fail a row."
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
    /// Generate observation documents from a tab-delimited input file.
    Generate(GenerateArgs),

    /// List the input columns the generator understands.
    Columns,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Tab-delimited input file, one lab result per row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <INPUT dir>/out).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON run config supplying subject/performer references.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// FHIR terminology server base URL.
    #[arg(long = "terminology-url", value_name = "URL")]
    pub terminology_url: Option<String>,

    /// Skip terminology lookups entirely; displays are omitted.
    #[arg(long = "no-lookup")]
    pub no_lookup: bool,

    /// Also write all observations as one collection Bundle.
    #[arg(long = "bundle")]
    pub bundle: bool,

    /// Parse and validate without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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

//! CLI argument definitions for the question importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use qbank_cli::types::ImportRequest;

#[derive(Parser)]
#[command(
    name = "qbank",
    version,
    about = "Import multiple-choice exam questions from spreadsheets and documents",
    long_about = "Import multiple-choice exam questions into a question bank.\n\n\
                  Reads CSV, Excel workbooks, candidate JSON and plain text, resolves\n\
                  column headers (including per-language columns), validates every row\n\
                  and writes the valid questions as JSON records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Include question text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the columns of a tabular file map to question fields.
    Headers(HeadersArgs),

    /// Validate a question file and write its valid rows.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// CSV or Excel file to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Workbook sheet to read (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Question file (.csv, .xlsx, .xls, .json or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Exam that receives the imported questions.
    #[arg(long = "exam-id", value_name = "ID")]
    pub exam_id: String,

    /// Question store to append to (default: <FILE stem>.questions.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Validate and report without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Workbook sheet to read (default: first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// List every invalid row with its errors.
    #[arg(long = "show-invalid")]
    pub show_invalid: bool,
}

impl ImportArgs {
    pub fn to_request(&self) -> ImportRequest {
        ImportRequest {
            file: self.file.clone(),
            exam_id: self.exam_id.clone(),
            output: self.output.clone(),
            dry_run: self.dry_run,
            sheet: self.sheet.clone(),
        }
    }
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

//! CLI argument definitions for the LineSight ingestion client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "linesight",
    version,
    about = "LineSight ingestion client - upload production data and confirm column mappings",
    long_about = "Upload production-line data files to the LineSight backend, review the\n\
                  suggested column mappings, correct them, and confirm the final schema.\n\
                  Matching (hash/fuzzy/LLM) runs server-side; this tool drives the review."
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

    /// Base URL of the LineSight backend.
    #[arg(
        long = "api-url",
        value_name = "URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_url: String,

    /// Directory holding in-progress mapping drafts.
    #[arg(
        long = "drafts-dir",
        value_name = "DIR",
        default_value = ".linesight/drafts",
        global = true
    )]
    pub drafts_dir: PathBuf,

    /// Color scheme for review tables.
    #[arg(long = "theme", value_enum, default_value = "dark", global = true)]
    pub theme: ThemeArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a file and review the suggested column mapping.
    Upload(UploadArgs),

    /// Show the current edit state for an uploaded file.
    Review {
        /// Raw import id assigned at upload time.
        #[arg(value_name = "RAW_IMPORT_ID")]
        raw_import_id: String,
    },

    /// Correct the suggested mapping before confirmation.
    Map(MapArgs),

    /// Submit the reviewed mapping for confirmation.
    Confirm(ConfirmArgs),

    /// List a factory's production lines and their data sources.
    Lines {
        /// Factory to list lines for.
        #[arg(long = "factory", value_name = "FACTORY_ID")]
        factory: String,
    },

    /// Inspect or update a data source.
    #[command(subcommand)]
    DataSource(DataSourceCommand),

    /// List the target fields a column may map to.
    Fields,
}

#[derive(Parser)]
pub struct UploadArgs {
    /// Path to the data file (CSV) to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Skip the local header/sample preview before uploading.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Raw import id assigned at upload time.
    #[arg(value_name = "RAW_IMPORT_ID")]
    pub raw_import_id: String,

    /// Map a source column to a target field ("Source Column=target_field").
    /// Repeatable. Targets must come from `linesight fields`.
    #[arg(long = "set", value_name = "SOURCE=FIELD")]
    pub set: Vec<String>,

    /// Exclude a source column from ingestion. Repeatable.
    #[arg(long = "ignore", value_name = "SOURCE")]
    pub ignore: Vec<String>,

    /// Re-include a previously ignored source column. Repeatable.
    #[arg(long = "unignore", value_name = "SOURCE")]
    pub unignore: Vec<String>,

    /// Which source column carries the record timestamp.
    #[arg(long = "time-column", value_name = "SOURCE")]
    pub time_column: Option<String>,
}

#[derive(Parser)]
pub struct ConfirmArgs {
    /// Raw import id assigned at upload time.
    #[arg(value_name = "RAW_IMPORT_ID")]
    pub raw_import_id: String,

    /// Which source column carries the record timestamp
    /// (defaults to the value stored in the draft).
    #[arg(long = "time-column", value_name = "SOURCE")]
    pub time_column: Option<String>,

    /// Timestamp format hint for the backend parser.
    #[arg(long = "time-format", value_name = "FORMAT")]
    pub time_format: Option<String>,

    /// Confirm into an existing data source instead of creating one.
    #[arg(long = "data-source", value_name = "DATA_SOURCE_ID")]
    pub data_source: Option<String>,

    /// Factory to attach the new data source to.
    #[arg(long = "factory", value_name = "FACTORY_ID")]
    pub factory: Option<String>,

    /// Production line to attach the new data source to.
    #[arg(long = "line", value_name = "LINE_ID")]
    pub line: Option<String>,

    /// Ask the backend to learn your corrections as column aliases.
    #[arg(long = "learn")]
    pub learn: bool,
}

#[derive(Subcommand)]
pub enum DataSourceCommand {
    /// Show a data source, including its read-only schema column map.
    Show {
        #[arg(value_name = "DATA_SOURCE_ID")]
        id: String,
    },

    /// Update a data source's editable fields.
    ///
    /// Only the time column and description can change here. The confirmed
    /// schema's column map is immutable; re-ingest to change it.
    Update {
        #[arg(value_name = "DATA_SOURCE_ID")]
        id: String,

        /// New time column.
        #[arg(long = "time-column", value_name = "SOURCE")]
        time_column: Option<String>,

        /// New description.
        #[arg(long = "description", value_name = "TEXT")]
        description: Option<String>,
    },
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

/// CLI theme choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

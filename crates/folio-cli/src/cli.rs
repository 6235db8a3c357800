//! CLI argument definitions for the facsimile reader tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Facsimile reader tools - page numbering, navigation and transcripts",
    long_about = "Inspect and exercise a facsimile edition.\n\n\
                  Builds the page index from an image mapping, resolves roman and\n\
                  arabic page labels, sanitizes transcripts and replays reader sessions."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the page index from a mapping file and list it.
    Index(IndexArgs),

    /// Resolve display tokens (roman labels, page numbers) to page ids.
    Resolve(ResolveArgs),

    /// Show the display label of page ids.
    Display(DisplayArgs),

    /// Convert between integers and lowercase roman numerals.
    Roman(RomanArgs),

    /// Sanitize a transcript and list its page markers.
    Transcript(TranscriptArgs),

    /// Replay a reader session script against headless viewport and viewer.
    Session(SessionArgs),

    /// Print the effective reader settings as TOML.
    Settings(SettingsArgs),
}

#[derive(Parser)]
pub struct IndexArgs {
    /// JSON object mapping display labels to image paths.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,
}

#[derive(Parser)]
pub struct ResolveArgs {
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Report unmatched tokens instead of falling back to the first page.
    ///
    /// Exits with an error when any token does not resolve.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Tokens to resolve, e.g. `ii`, `12`, `3`.
    #[arg(value_name = "TOKEN", required = true)]
    pub tokens: Vec<String>,
}

#[derive(Parser)]
pub struct DisplayArgs {
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Internal page ids, e.g. `0004`.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(Parser)]
pub struct RomanArgs {
    /// An integer to convert to roman, or a roman numeral to convert back.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Parser)]
pub struct TranscriptArgs {
    /// HTML transcript to load.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the sanitized body here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List page markers instead of printing the body.
    #[arg(long = "markers")]
    pub markers: bool,

    /// Print markers as JSON (with --markers).
    #[arg(long = "json", requires = "markers")]
    pub json: bool,

    /// Reader settings file (default: the user config file).
    #[arg(long = "settings", value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SessionArgs {
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Reader settings file (default: the user config file).
    #[arg(long = "settings", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Initial viewport width in pixels.
    #[arg(long = "width", value_name = "PX", default_value_t = 1280.0)]
    pub width: f64,

    /// Transcript whose page markers are the only scroll anchors.
    #[arg(long = "transcript", value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Session script, one action per line.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

#[derive(Parser)]
pub struct SettingsArgs {
    /// Settings file to read (default: the user config file).
    #[arg(long = "path", value_name = "FILE")]
    pub path: Option<PathBuf>,
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

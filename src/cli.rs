use clap::{Args, Parser, ValueEnum};
use crossmap_core::DEFAULT_UNKNOWN_NAME;
use std::path::PathBuf;

/// Level Crossing Map - Narrow railway level crossings by facet and name, then map them
///
/// Examples:
///   # Summarize every crossing in the table
///   crossmap crossings.csv
///
///   # Crossings whose name contains a text
///   crossmap crossings.csv --search 踏切
///
///   # Filter by facets (AND between facets)
///   crossmap crossings.csv --line 山手線 --type 第1種
///
///   # Generic facet syntax, by slug or by column name
///   crossmap crossings.csv --facet branch=東京支社 --facet 踏切種別=第4種
///
///   # Write an interactive map page
///   crossmap crossings.csv --line 山手線 --format html --output map.html
#[derive(Parser, Debug)]
#[command(name = "crossmap")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - The name search is a literal, case-sensitive substring match\n  \
    - Each facet selection must match exactly; all active filters are combined with AND\n  \
    - A facet value of すべて (or all) means no constraint\n  \
    - Crossings without coordinates are counted but not placed on the map\n\n\
Facets:\n  \
    - line (線名), branch (支社名), location (箇所名（系統名なし）), type (踏切種別)")]
pub struct Cli {
    /// Path to the level crossing CSV file
    #[arg(value_name = "FILE", env = "CROSSMAP_DATA")]
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Initial zoom level of the HTML map
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u8).range(1..=19))]
    pub zoom: u8,

    /// Popup title used for crossings without a name
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_UNKNOWN_NAME)]
    pub unknown_name: String,

    /// Print the available values of every facet and exit
    #[arg(long)]
    pub list_facets: bool,
}

/// Per-request filter input
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep crossings whose name contains this text
    #[arg(short, long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Filter by line name (線名)
    #[arg(long, value_name = "LINE")]
    pub line: Option<String>,

    /// Filter by branch office (支社名)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Filter by location (箇所名（系統名なし）)
    #[arg(long, value_name = "LOCATION")]
    pub location: Option<String>,

    /// Filter by crossing type (踏切種別)
    #[arg(long = "type", value_name = "TYPE")]
    pub crossing_type: Option<String>,

    /// Filter by facet (format: facet=value, can be specified multiple times)
    #[arg(short, long = "facet", value_name = "NAME=VALUE")]
    pub facets: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown-style report
    Text,
    /// Count, facets and map payload as JSON
    Json,
    /// Standalone page with an interactive Leaflet map
    Html,
}

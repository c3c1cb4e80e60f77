use clap::Parser;
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Schema-driven mock data generator
#[derive(Parser, Debug, Clone)]
#[command(name = "schemock", version, about, long_about = None)]
pub struct Cli {
    /// Schema file (.json, .yaml or .yml)
    pub schema: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMOCK_CONFIG", default_value = "schemock.toml")]
    pub config: PathBuf,

    /// Number of values to generate; prints a list instead of a single value
    #[arg(short = 'n', long, env = "SCHEMOCK_COUNT")]
    pub count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long, env = "SCHEMOCK_SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, env = "SCHEMOCK_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Directory of named schemas available to `$ref`
    #[arg(long, env = "SCHEMOCK_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Generated dates fall within this many days before now
    #[arg(long, env = "SCHEMOCK_RECENT_DAYS")]
    pub recent_days: Option<u32>,
}

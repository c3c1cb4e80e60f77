use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod schema;
pub mod validator;

pub use schema::{load_schema_file, SchemaConfig, SchemaDocument, SchemaLibrary};
pub use validator::{ConfigValidator, SchemaLinter, SchemaWarning, ValidationError};

use crate::adapters::generator::GeneratorOptions;
use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub output: OutputSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateSettings {
    /// Number of values to produce. `None` prints a single value instead of a list.
    #[serde(default)]
    pub count: Option<usize>,
    /// Seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
    /// Dates fall within this many days before now
    pub recent_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Directory of named schemas available to `$ref`
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("generate.recent_days", 1)?
            .set_default("output.format", "json")?
            .set_default("output.pretty", true)?
            .set_default("library.dir", "schemas")?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(count) = cli.count {
            self.generate.count = Some(count);
        }
        if let Some(seed) = cli.seed {
            self.generate.seed = Some(seed);
        }
        if let Some(days) = cli.recent_days {
            self.generate.recent_days = days;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.compact {
            self.output.pretty = false;
        }
        if let Some(dir) = &cli.library {
            self.library.dir = dir.clone();
        }
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            recent_days: self.generate.recent_days,
        }
    }
}

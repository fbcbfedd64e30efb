pub mod cli;
pub mod toml_config;

use crate::core::options::{BusinessMapOptions, MapOptions};
use crate::utils::error::{BizMapError, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
use toml_config::{SourceConfig, TomlConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "business-maps")]
#[command(about = "Render business directory listings as embeddable Leaflet maps")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory source: a .csv/.json export or an http(s) endpoint
    #[arg(long)]
    pub source: Option<String>,

    /// Write output files here instead of printing to stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Map of every located business, optionally filtered by category
    Map(MapArgs),
    /// Map of a single business
    BusinessMap(BusinessMapArgs),
    /// Write the client-side Leaflet init script
    Script,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct MapArgs {
    /// Category slug filter
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of businesses
    #[arg(long)]
    pub limit: Option<usize>,

    /// CSS height of the map, e.g. 400px
    #[arg(long)]
    pub height: Option<String>,

    /// Initial zoom level (1-20)
    #[arg(long)]
    pub zoom: Option<u8>,

    /// Group nearby markers (true/false, yes/no, on/off, 1/0)
    #[arg(long, value_parser = parse_flag)]
    pub clustering: Option<bool>,

    /// Additional CSS class
    #[arg(long)]
    pub class: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct BusinessMapArgs {
    /// Business id
    #[arg(long)]
    pub id: u64,

    #[arg(long)]
    pub height: Option<String>,

    #[arg(long)]
    pub zoom: Option<u8>,

    #[arg(long)]
    pub class: Option<String>,
}

/// Loose boolean parsing for directive flags.
pub fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        other => Err(format!("expected a boolean, got '{}'", other)),
    }
}

#[cfg(feature = "cli")]
impl MapArgs {
    pub fn apply(&self, mut base: MapOptions) -> MapOptions {
        if let Some(category) = &self.category {
            base.category = Some(category.clone());
        }
        if let Some(limit) = self.limit {
            base.limit = limit;
        }
        if let Some(height) = &self.height {
            base.height = height.clone();
        }
        if let Some(zoom) = self.zoom {
            base.zoom = zoom;
        }
        if let Some(clustering) = self.clustering {
            base.clustering = clustering;
        }
        if let Some(class) = &self.class {
            base.class = Some(class.clone());
        }
        base
    }
}

#[cfg(feature = "cli")]
impl BusinessMapArgs {
    pub fn apply(&self, mut base: BusinessMapOptions) -> BusinessMapOptions {
        base.id = self.id;
        if let Some(height) = &self.height {
            base.height = height.clone();
        }
        if let Some(zoom) = self.zoom {
            base.zoom = zoom;
        }
        if let Some(class) = &self.class {
            base.class = Some(class.clone());
        }
        base
    }
}

/// Source resolution: `--source` wins over the config file.
pub fn resolve_source(cli_source: Option<&str>, file: &TomlConfig) -> Result<SourceConfig> {
    match (cli_source, &file.source) {
        (Some(location), _) => Ok(SourceConfig::from_location(location)),
        (None, Some(source)) => Ok(source.clone()),
        (None, None) => Err(BizMapError::MissingConfigError {
            field: "source".to_string(),
        }),
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    pub fn output_path(&self, file: &TomlConfig) -> Option<String> {
        self.output
            .clone()
            .or_else(|| file.output_path().map(str::to_string))
    }
}

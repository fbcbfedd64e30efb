pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::{DirectorySource, FileDirectory, HttpDirectory, MemoryDirectory};
pub use crate::core::{
    center::calculate_map_center,
    dependency::ensure_directory_available,
    marker::{build_markers, build_popup_html},
    options::{BusinessMapOptions, MapOptions},
    renderer::MapRenderer,
};
pub use domain::model::{Business, BusinessPin, GeoPoint, MapMarker, MapView};
pub use utils::error::{BizMapError, Result};

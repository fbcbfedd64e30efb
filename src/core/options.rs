use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;
pub const DEFAULT_HEIGHT: &str = "400px";

/// Parameters of the multi-business map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub category: Option<String>,
    pub limit: usize,
    pub height: String,
    pub zoom: u8,
    pub clustering: bool,
    pub class: Option<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            category: None,
            limit: 100,
            height: DEFAULT_HEIGHT.to_string(),
            zoom: 13,
            clustering: true,
            class: None,
        }
    }
}

impl Validate for MapOptions {
    fn validate(&self) -> Result<()> {
        validate_positive_number("map.limit", self.limit, 1)?;
        validate_non_empty_string("map.height", &self.height)?;
        validate_range("map.zoom", self.zoom, MIN_ZOOM, MAX_ZOOM)?;
        Ok(())
    }
}

/// Parameters of the single-business map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessMapOptions {
    pub id: u64,
    pub height: String,
    pub zoom: u8,
    pub class: Option<String>,
}

impl Default for BusinessMapOptions {
    fn default() -> Self {
        Self {
            id: 0,
            height: DEFAULT_HEIGHT.to_string(),
            zoom: 15,
            class: None,
        }
    }
}

impl BusinessMapOptions {
    pub fn for_business(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Validate for BusinessMapOptions {
    fn validate(&self) -> Result<()> {
        validate_range("business_map.id", self.id, 1, u64::MAX)?;
        validate_non_empty_string("business_map.height", &self.height)?;
        validate_range("business_map.zoom", self.zoom, MIN_ZOOM, MAX_ZOOM)?;
        Ok(())
    }
}

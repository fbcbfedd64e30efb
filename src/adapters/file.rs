use crate::adapters::memory::MemoryDirectory;
use crate::domain::model::{parse_coordinate, Business, BusinessQuery};
use crate::domain::ports::BusinessDirectory;
use crate::utils::error::{BizMapError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }
}

/// CSV layout of a directory export. Empty cells are absent values and
/// `categories` holds `;`-separated slugs.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u64,
    title: String,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    permalink: Option<String>,
    #[serde(default)]
    maps_uri: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    categories: Option<String>,
}

impl From<CsvRow> for Business {
    fn from(row: CsvRow) -> Self {
        Business {
            id: row.id,
            title: row.title,
            latitude: row.latitude.as_deref().and_then(parse_coordinate),
            longitude: row.longitude.as_deref().and_then(parse_coordinate),
            address: row.address,
            permalink: row.permalink.unwrap_or_default(),
            maps_uri: row.maps_uri,
            thumbnail: row.thumbnail,
            categories: row
                .categories
                .map(|c| {
                    c.split(';')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

pub fn parse_csv(data: &[u8]) -> Result<Vec<Business>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut businesses: Vec<Business> = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        businesses.push(Business::from(row?));
    }
    Ok(businesses)
}

pub fn parse_json(data: &[u8]) -> Result<Vec<Business>> {
    Ok(serde_json::from_slice(data)?)
}

/// Directory export on disk (`.csv` or `.json`), re-read on every request.
#[derive(Debug, Clone)]
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<MemoryDirectory> {
        let format = FileFormat::from_path(&self.path).ok_or_else(|| {
            BizMapError::DirectoryFormatError {
                source_desc: self.describe(),
                message: "expected a .csv or .json file".to_string(),
            }
        })?;

        let data = tokio::fs::read(&self.path).await?;
        let businesses = match format {
            FileFormat::Csv => parse_csv(&data)?,
            FileFormat::Json => parse_json(&data)?,
        };

        tracing::debug!("Loaded {} businesses from {}", businesses.len(), self.path.display());
        Ok(MemoryDirectory::with_label(self.describe(), businesses))
    }
}

#[async_trait]
impl BusinessDirectory for FileDirectory {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Business>> {
        Ok(self.load().await?.get(id).cloned())
    }

    async fn query(&self, query: &BusinessQuery) -> Result<Vec<Business>> {
        Ok(self.load().await?.select(query))
    }

    async fn health_check(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(BizMapError::DirectoryUnavailable {
                source_desc: self.describe(),
                message: "file not found".to_string(),
            });
        }
        self.load().await.map(|_| ())
    }
}

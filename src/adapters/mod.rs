// Adapters layer: concrete business directories.

pub mod file;
pub mod http;
pub mod memory;

pub use file::FileDirectory;
pub use http::HttpDirectory;
pub use memory::MemoryDirectory;

use crate::domain::model::{Business, BusinessQuery};
use crate::domain::ports::BusinessDirectory;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Directory chosen at startup from configuration.
#[derive(Debug, Clone)]
pub enum DirectorySource {
    File(FileDirectory),
    Http(HttpDirectory),
    Memory(MemoryDirectory),
}

#[async_trait]
impl BusinessDirectory for DirectorySource {
    fn describe(&self) -> String {
        match self {
            DirectorySource::File(d) => d.describe(),
            DirectorySource::Http(d) => d.describe(),
            DirectorySource::Memory(d) => d.describe(),
        }
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Business>> {
        match self {
            DirectorySource::File(d) => d.find_by_id(id).await,
            DirectorySource::Http(d) => d.find_by_id(id).await,
            DirectorySource::Memory(d) => d.find_by_id(id).await,
        }
    }

    async fn query(&self, query: &BusinessQuery) -> Result<Vec<Business>> {
        match self {
            DirectorySource::File(d) => d.query(query).await,
            DirectorySource::Http(d) => d.query(query).await,
            DirectorySource::Memory(d) => d.query(query).await,
        }
    }

    async fn health_check(&self) -> Result<()> {
        match self {
            DirectorySource::File(d) => d.health_check().await,
            DirectorySource::Http(d) => d.health_check().await,
            DirectorySource::Memory(d) => d.health_check().await,
        }
    }
}

use crate::adapters::memory::MemoryDirectory;
use crate::domain::model::{Business, BusinessQuery};
use crate::domain::ports::BusinessDirectory;
use crate::utils::error::{BizMapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Directory served over HTTP as a JSON array of business records.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    endpoint: String,
    client: Client,
}

impl HttpDirectory {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self) -> Result<MemoryDirectory> {
        tracing::debug!("Making directory request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Directory response status: {}", status);

        if !status.is_success() {
            return Err(BizMapError::DirectoryUnavailable {
                source_desc: self.describe(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await?;
        let businesses: Vec<Business> =
            serde_json::from_slice(&body).map_err(|e| BizMapError::DirectoryFormatError {
                source_desc: self.describe(),
                message: format!("expected a JSON array of businesses: {}", e),
            })?;

        tracing::debug!("Fetched {} businesses from {}", businesses.len(), self.endpoint);
        Ok(MemoryDirectory::with_label(self.describe(), businesses))
    }
}

#[async_trait]
impl BusinessDirectory for HttpDirectory {
    fn describe(&self) -> String {
        format!("http:{}", self.endpoint)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Business>> {
        Ok(self.fetch().await?.get(id).cloned())
    }

    async fn query(&self, query: &BusinessQuery) -> Result<Vec<Business>> {
        Ok(self.fetch().await?.select(query))
    }

    async fn health_check(&self) -> Result<()> {
        self.fetch().await.map(|_| ())
    }
}

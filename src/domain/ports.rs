use crate::domain::model::{Business, BusinessQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// The external store that owns business listings.
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Short label used in logs and error messages.
    fn describe(&self) -> String;

    async fn find_by_id(&self, id: u64) -> Result<Option<Business>>;

    /// Businesses with both coordinates, in directory order, at most
    /// `query.limit` of them.
    async fn query(&self, query: &BusinessQuery) -> Result<Vec<Business>>;

    async fn health_check(&self) -> Result<()>;
}

use crate::domain::model::{Business, BusinessQuery};
use crate::domain::ports::BusinessDirectory;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Directory held in memory. File and HTTP sources load into one of these.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    label: String,
    businesses: Vec<Business>,
}

impl MemoryDirectory {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self::with_label("memory", businesses)
    }

    pub fn with_label(label: impl Into<String>, businesses: Vec<Business>) -> Self {
        Self {
            label: label.into(),
            businesses,
        }
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn get(&self, id: u64) -> Option<&Business> {
        self.businesses.iter().find(|b| b.id == id)
    }

    /// Located businesses matching `query`, directory order preserved.
    pub fn select(&self, query: &BusinessQuery) -> Vec<Business> {
        self.businesses
            .iter()
            .filter(|b| b.is_plottable())
            .filter(|b| match query.category.as_deref() {
                Some(slug) => b.in_category(slug),
                None => true,
            })
            .take(query.limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BusinessDirectory for MemoryDirectory {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Business>> {
        Ok(self.get(id).cloned())
    }

    async fn query(&self, query: &BusinessQuery) -> Result<Vec<Business>> {
        Ok(self.select(query))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> MemoryDirectory {
        let mut cafe = Business::new(1, "Cafe").with_coordinates(1.0, 1.0);
        cafe.categories = vec!["food".to_string()];
        let mut gym = Business::new(2, "Gym").with_coordinates(2.0, 2.0);
        gym.categories = vec!["fitness".to_string()];
        let mut deli = Business::new(3, "Deli").with_coordinates(3.0, 3.0);
        deli.categories = vec!["food".to_string(), "shops".to_string()];
        let mut ghost = Business::new(4, "Ghost Kitchen");
        ghost.categories = vec!["food".to_string()];

        MemoryDirectory::new(vec![cafe, gym, deli, ghost])
    }

    #[test]
    fn test_select_by_category() {
        let query = BusinessQuery {
            category: Some("food".to_string()),
            limit: 100,
        };
        let ids: Vec<u64> = directory().select(&query).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_limit_counts_only_located_businesses() {
        let query = BusinessQuery {
            category: None,
            limit: 2,
        };
        let ids: Vec<u64> = directory().select(&query).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_unlocated_business() {
        let directory = directory();
        let ghost = directory.find_by_id(4).await.unwrap().unwrap();
        assert_eq!(ghost.title, "Ghost Kitchen");
        assert!(directory.find_by_id(42).await.unwrap().is_none());
    }
}

use crate::error::ApiError;
use async_trait::async_trait;
use movie_catalog_models::{MovieDetail, SearchHit};

/// A remote search-and-fetch movie database
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    fn source_name(&self) -> &str;

    /// Look titles up by name. An empty match set is reported by the
    /// provider as an error, not as an empty list.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError>;

    /// Full record for one external id
    async fn fetch_detail(&self, external_id: &str) -> Result<MovieDetail, ApiError>;
}

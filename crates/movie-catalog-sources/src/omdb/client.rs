use crate::error::ApiError;
use crate::omdb::api;
use crate::traits::MovieDatabase;
use async_trait::async_trait;
use movie_catalog_models::{MovieDetail, SearchHit};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cinemabase/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("OMDb client ready ({})", base_url);
        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl MovieDatabase for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn fetch_detail(&self, external_id: &str) -> Result<MovieDetail, ApiError> {
        api::fetch_detail(&self.client, &self.base_url, &self.api_key, external_id).await
    }
}

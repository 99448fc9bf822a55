use crate::error::ApiError;
use movie_catalog_models::{MovieDetail, SearchHit, PLACEHOLDER_POSTER};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// OMDb's marker for a missing field value
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>, // Not sent by the search endpoint today
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

fn is_success(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn poster_or_placeholder(poster: Option<String>) -> String {
    match poster {
        Some(p) if !p.trim().is_empty() && p != NOT_AVAILABLE => p,
        _ => PLACEHOLDER_POSTER.to_string(),
    }
}

/// Decode an OMDb search body
pub fn decode_search(body: &str) -> Result<Vec<SearchHit>, ApiError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;

    if !is_success(&parsed.response) {
        let message = parsed.error.unwrap_or_else(|| "Unknown error".to_string());
        return Err(ApiError::Provider(message));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchHit {
            external_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: poster_or_placeholder(item.poster),
            external_rating: item.imdb_rating.and_then(|r| r.trim().parse::<f64>().ok()),
        })
        .collect())
}

/// Decode an OMDb detail body. `external_id` fills in a missing `imdbID`.
pub fn decode_detail(body: &str, external_id: &str) -> Result<MovieDetail, ApiError> {
    let parsed: OmdbDetailResponse = serde_json::from_str(body)?;

    if !is_success(&parsed.response) {
        let message = parsed.error.unwrap_or_else(|| "Unknown error".to_string());
        return Err(ApiError::Provider(message));
    }

    let title = parsed
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Decode("detail response has no Title".to_string()))?;

    let na = || NOT_AVAILABLE.to_string();
    Ok(MovieDetail {
        external_id: parsed.imdb_id.unwrap_or_else(|| external_id.to_string()),
        title,
        year: parsed.year.unwrap_or_else(na),
        runtime: parsed.runtime.unwrap_or_else(na),
        genre: parsed.genre.unwrap_or_else(na),
        rating: parsed.imdb_rating.unwrap_or_else(na),
        director: parsed.director.unwrap_or_else(na),
        plot: parsed.plot.unwrap_or_else(na),
        poster: parsed.poster.unwrap_or_else(na),
    })
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    let response = client.get(&url).query(params).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!("OMDb request failed: {} - {}", status, error_text);
        return Err(ApiError::Transport(format!("HTTP {} - {}", status, error_text)));
    }

    Ok(response.text().await?)
}

/// Search OMDb by title
pub async fn search(client: &Client, base_url: &str, api_key: &str, query: &str) -> Result<Vec<SearchHit>, ApiError> {
    debug!("Searching OMDb for {:?}", query);
    let body = get_body(client, base_url, &[("s", query), ("apikey", api_key)]).await?;
    let hits = decode_search(&body)?;
    debug!("OMDb search for {:?} returned {} results", query, hits.len());
    Ok(hits)
}

/// Fetch full OMDb detail for one IMDb id
pub async fn fetch_detail(client: &Client, base_url: &str, api_key: &str, imdb_id: &str) -> Result<MovieDetail, ApiError> {
    debug!("Fetching OMDb detail for {}", imdb_id);
    let body = get_body(client, base_url, &[("i", imdb_id), ("apikey", api_key)]).await?;
    decode_detail(&body, imdb_id)
}

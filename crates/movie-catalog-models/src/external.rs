use serde::{Deserialize, Serialize};

/// A lightweight search result from the remote movie database.
/// Not a catalog record until imported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub external_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub external_rating: Option<f64>,
}

/// Full record for one title, as the provider reports it (raw text fields)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub external_id: String,
    pub title: String,
    pub year: String,
    pub runtime: String,
    pub genre: String, // Comma-separated
    pub rating: String,
    pub director: String,
    pub plot: String,
    pub poster: String, // URL or the provider's "N/A" sentinel
}

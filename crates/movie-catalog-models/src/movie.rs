use crate::ids::{DirectorId, MovieId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Poster used when a movie has none
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=Film";

fn default_poster() -> String {
    PLACEHOLDER_POSTER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub duration: u32, // Minutes
    pub genre: String,
    pub rating: f64, // 0-10
    pub director: DirectorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default = "default_poster")]
    pub poster: String,
    pub created_at: DateTime<Utc>,
}

/// Movie form data as entered by the user.
///
/// Numeric fields are optional so that a missing or unparsable value can be
/// reported as a validation error instead of failing earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieInput {
    pub id: Option<MovieId>,
    pub title: String,
    pub year: Option<i32>,
    pub duration: Option<i32>,
    pub genre: String,
    pub rating: Option<f64>,
    pub director: Option<DirectorId>,
    pub synopsis: Option<String>,
    pub poster: Option<String>,
}

impl From<&Movie> for MovieInput {
    fn from(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id),
            title: movie.title.clone(),
            year: Some(movie.year),
            duration: i32::try_from(movie.duration).ok(),
            genre: movie.genre.clone(),
            rating: Some(movie.rating),
            director: Some(movie.director),
            synopsis: movie.synopsis.clone(),
            poster: Some(movie.poster.clone()),
        }
    }
}

//! Read-only views derived from the catalog. Nothing here mutates or
//! persists anything; every function recomputes from the slices it is given.

use movie_catalog_models::{Director, DirectorId, Genre, Movie, MovieId};
use serde::Serialize;
use std::cmp::Ordering;

/// Movies released in or after this year count as recent on the dashboard
pub const RECENT_YEAR: i32 = 2024;

pub const DEFAULT_TOP_RATED: usize = 10;

const CHART_LABEL_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::YearAsc,
        SortKey::YearDesc,
        SortKey::RatingAsc,
        SortKey::RatingDesc,
    ];

    /// `None` for anything unrecognized, which leaves the order untouched
    pub fn parse(key: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|k| k.as_str() == key.trim())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::YearDesc => "year-desc",
            SortKey::RatingAsc => "rating-asc",
            SortKey::RatingDesc => "rating-desc",
        }
    }

    fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            SortKey::TitleAsc => compare_titles(a, b),
            SortKey::TitleDesc => compare_titles(b, a),
            SortKey::YearAsc => a.year.cmp(&b.year),
            SortKey::YearDesc => b.year.cmp(&a.year),
            SortKey::RatingAsc => a.rating.total_cmp(&b.rating),
            SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

fn compare_titles(a: &Movie, b: &Movie) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_movies: usize,
    /// One decimal place, or "0" for an empty catalog
    pub average_rating: String,
    pub director_count: usize,
    pub recent_movie_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: Genre,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorRow<'a> {
    pub director: &'a Director,
    pub movie_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailView<'a> {
    pub movie: &'a Movie,
    /// "N/A" when the referenced director no longer exists
    pub director_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingPoint {
    pub label: String,
    pub rating: f64,
}

/// Filter by a case-insensitive search over title or synopsis and an exact
/// genre, then sort. The input order is kept for ties and when no sort key
/// applies.
pub fn list_movies<'a>(
    movies: &'a [Movie],
    search_term: &str,
    genre_filter: &str,
    sort: Option<SortKey>,
) -> Vec<&'a Movie> {
    let needle = search_term.to_lowercase();

    let mut filtered: Vec<&Movie> = movies
        .iter()
        .filter(|m| {
            m.title.to_lowercase().contains(&needle)
                || m
                    .synopsis
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
        .filter(|m| genre_filter.is_empty() || m.genre == genre_filter)
        .collect();

    if let Some(key) = sort {
        filtered.sort_by(|a, b| key.compare(a, b));
    }
    filtered
}

pub fn dashboard_summary(movies: &[Movie], directors: &[Director]) -> DashboardSummary {
    let average_rating = if movies.is_empty() {
        "0".to_string()
    } else {
        let total: f64 = movies.iter().map(|m| m.rating).sum();
        let average = total / movies.len() as f64;
        // Halves round up ("7.25" -> "7.3"); `{:.1}` alone rounds them to even
        format!("{:.1}", (average * 10.0).round() / 10.0)
    };

    DashboardSummary {
        total_movies: movies.len(),
        average_rating,
        director_count: directors.len(),
        recent_movie_count: movies.iter().filter(|m| m.year >= RECENT_YEAR).count(),
    }
}

/// Count per fixed category, in category order. Free-text genres outside the
/// fixed set are not counted.
pub fn genre_counts(movies: &[Movie]) -> Vec<GenreCount> {
    Genre::ALL
        .into_iter()
        .map(|genre| GenreCount {
            genre,
            count: movies.iter().filter(|m| m.genre == genre.label()).count(),
        })
        .collect()
}

pub fn top_rated_movies(movies: &[Movie], n: usize) -> Vec<&Movie> {
    let mut ranked: Vec<&Movie> = movies.iter().collect();
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked.truncate(n);
    ranked
}

pub fn movie_count_for_director(movies: &[Movie], id: DirectorId) -> usize {
    movies.iter().filter(|m| m.director == id).count()
}

pub fn director_rows<'a>(movies: &[Movie], directors: &'a [Director]) -> Vec<DirectorRow<'a>> {
    directors
        .iter()
        .map(|director| DirectorRow {
            director,
            movie_count: movie_count_for_director(movies, director.id),
        })
        .collect()
}

pub fn movie_detail<'a>(movies: &'a [Movie], directors: &[Director], id: MovieId) -> Option<MovieDetailView<'a>> {
    let movie = movies.iter().find(|m| m.id == id)?;
    let director_name = directors
        .iter()
        .find(|d| d.id == movie.director)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "N/A".to_string());
    Some(MovieDetailView { movie, director_name })
}

/// Top-rated series for the rating chart, labels cut to 20 characters
pub fn rating_chart(movies: &[Movie], n: usize) -> Vec<RatingPoint> {
    top_rated_movies(movies, n)
        .into_iter()
        .map(|m| RatingPoint {
            label: m.title.chars().take(CHART_LABEL_CHARS).collect(),
            rating: m.rating,
        })
        .collect()
}

use crate::catalog::CatalogStore;
use crate::error::{CatalogError, ImportError, ValidationErrors};
use crate::storage::KeyValueStore;
use crate::validation::check_movie_fields;
use movie_catalog_models::{Movie, MovieDetail, MovieInput, SearchHit, PLACEHOLDER_POSTER};
use movie_catalog_sources::MovieDatabase;
use tracing::{debug, info, warn};

/// Used when the provider's runtime cannot be read
pub const DEFAULT_DURATION_MINUTES: i32 = 120;

/// Director name used when the provider has none
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

const NOT_AVAILABLE: &str = "N/A";

/// Brings records from a remote movie database into the catalog
pub struct MovieImporter<D: MovieDatabase> {
    database: D,
}

impl<D: MovieDatabase> MovieImporter<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// Search the remote database by title
    pub async fn search(&self, query: &str) -> Result<impl Iterator<Item = SearchHit>, ImportError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ImportError::EmptyQuery);
        }

        let hits = self.database.search(query).await.map_err(|e| {
            warn!("{} search for {:?} failed: {}", self.database.source_name(), query, e);
            ImportError::Api(e)
        })?;
        debug!("{} search for {:?}: {} hits", self.database.source_name(), query, hits.len());
        Ok(hits.into_iter())
    }

    /// Fetch one title and add it to the catalog
    pub async fn import<S: KeyValueStore>(
        &self,
        store: &mut CatalogStore<S>,
        external_id: &str,
    ) -> Result<Movie, ImportError> {
        let detail = self.database.fetch_detail(external_id.trim()).await.map_err(|e| {
            warn!("{} fetch of {} failed: {}", self.database.source_name(), external_id, e);
            ImportError::Api(e)
        })?;
        import_detail(store, &detail)
    }
}

/// Add an already fetched record to the catalog.
///
/// Rejects titles already present (case-insensitive) and inputs that would
/// fail validation before any director is created.
pub fn import_detail<S: KeyValueStore>(
    store: &mut CatalogStore<S>,
    detail: &MovieDetail,
) -> Result<Movie, ImportError> {
    let title = detail.title.trim();
    let wanted = title.to_lowercase();
    if store.movies().iter().any(|m| m.title.to_lowercase() == wanted) {
        info!("Skipping import of {:?}: already in the catalog", title);
        return Err(ImportError::Duplicate {
            title: title.to_string(),
        });
    }

    let input = map_detail(detail);

    let mut errors = ValidationErrors::new();
    check_movie_fields(&input, &mut errors);
    if !errors.is_empty() {
        return Err(ImportError::Catalog(CatalogError::Validation(errors)));
    }

    let movie = store.add_movie_with_director_name(input, &director_name(&detail.director))?;
    info!("Imported {:?} ({}) as movie {}", movie.title, detail.external_id, movie.id);
    Ok(movie)
}

/// Map provider fields onto a movie form. The director is resolved by the caller.
pub fn map_detail(detail: &MovieDetail) -> MovieInput {
    let genre = detail
        .genre
        .split(',')
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let duration = leading_int(&detail.runtime)
        .filter(|d| *d != 0)
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    MovieInput {
        id: None,
        title: detail.title.trim().to_string(),
        year: leading_int(&detail.year),
        duration: Some(duration),
        genre,
        rating: Some(leading_float(&detail.rating).unwrap_or(0.0)),
        director: None,
        synopsis: available(&detail.plot),
        poster: Some(available(&detail.poster).unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())),
    }
}

fn available(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == NOT_AVAILABLE {
        None
    } else {
        Some(value.to_string())
    }
}

fn director_name(raw: &str) -> String {
    available(raw).unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string())
}

/// Integer prefix of `text` ("148 min" -> 148, "2010–2012" -> 2010)
fn leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..].chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

/// Decimal prefix of `text` ("8.8" -> 8.8, "N/A" -> None)
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            '-' | '+' if i == 0 => {}
            _ => break,
        }
    }
    if end == 0 {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use movie_catalog_models::DirectorId;
    use movie_catalog_sources::ApiError;
    use std::collections::HashMap;

    struct FakeDatabase {
        details: HashMap<String, MovieDetail>,
    }

    impl FakeDatabase {
        fn with(details: Vec<MovieDetail>) -> Self {
            Self {
                details: details.into_iter().map(|d| (d.external_id.clone(), d)).collect(),
            }
        }
    }

    #[async_trait]
    impl MovieDatabase for FakeDatabase {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
            let needle = query.to_lowercase();
            let hits: Vec<SearchHit> = self
                .details
                .values()
                .filter(|d| d.title.to_lowercase().contains(&needle))
                .map(|d| SearchHit {
                    external_id: d.external_id.clone(),
                    title: d.title.clone(),
                    year: d.year.clone(),
                    poster: PLACEHOLDER_POSTER.to_string(),
                    external_rating: None,
                })
                .collect();
            if hits.is_empty() {
                return Err(ApiError::Provider("Movie not found!".to_string()));
            }
            Ok(hits)
        }

        async fn fetch_detail(&self, external_id: &str) -> Result<MovieDetail, ApiError> {
            self.details
                .get(external_id)
                .cloned()
                .ok_or_else(|| ApiError::Provider("Incorrect IMDb ID.".to_string()))
        }
    }

    fn inception() -> MovieDetail {
        MovieDetail {
            external_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            runtime: "148 min".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            rating: "8.8".to_string(),
            director: "Christopher Nolan".to_string(),
            plot: "A thief who steals corporate secrets through dream-sharing.".to_string(),
            poster: "https://img/inception.jpg".to_string(),
        }
    }

    fn sparse() -> MovieDetail {
        MovieDetail {
            external_id: "tt0000002".to_string(),
            title: "Lost Reel".to_string(),
            year: "1931".to_string(),
            runtime: "N/A".to_string(),
            genre: "Drama".to_string(),
            rating: "N/A".to_string(),
            director: "N/A".to_string(),
            plot: "N/A".to_string(),
            poster: "N/A".to_string(),
        }
    }

    #[test]
    fn test_map_detail() {
        let input = map_detail(&inception());
        assert_eq!(input.title, "Inception");
        assert_eq!(input.year, Some(2010));
        assert_eq!(input.duration, Some(148));
        assert_eq!(input.genre, "Action");
        assert_eq!(input.rating, Some(8.8));
        assert_eq!(input.poster.as_deref(), Some("https://img/inception.jpg"));
        assert!(input.synopsis.is_some());
    }

    #[test]
    fn test_map_detail_defaults() {
        let input = map_detail(&sparse());
        assert_eq!(input.duration, Some(DEFAULT_DURATION_MINUTES));
        assert_eq!(input.rating, Some(0.0));
        assert_eq!(input.synopsis, None);
        assert_eq!(input.poster.as_deref(), Some(PLACEHOLDER_POSTER));
        assert_eq!(director_name(&sparse().director), UNKNOWN_DIRECTOR);
    }

    #[test]
    fn test_leading_number_parsing() {
        assert_eq!(leading_int("148 min"), Some(148));
        assert_eq!(leading_int("2010–2012"), Some(2010));
        assert_eq!(leading_int("N/A"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_float("8.8"), Some(8.8));
        assert_eq!(leading_float("7"), Some(7.0));
        assert_eq!(leading_float("6.5/10"), Some(6.5));
        assert_eq!(leading_float("N/A"), None);
    }

    #[tokio::test]
    async fn test_import_twice_is_duplicate() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![inception()]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();

        let movie = importer.import(&mut store, "tt1375666").await.unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(store.movies().len(), 1);
        assert_eq!(store.directors().len(), 1);
        assert_eq!(store.directors()[0].name, "Christopher Nolan");

        let second = importer.import(&mut store, "tt1375666").await;
        assert!(matches!(second, Err(ImportError::Duplicate { ref title }) if title == "Inception"));
        assert_eq!(store.movies().len(), 1);
        assert_eq!(store.directors().len(), 1);
    }

    #[tokio::test]
    async fn test_import_reuses_existing_director() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![inception()]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
        let nolan = store.find_or_create_director("christopher nolan").unwrap();

        let movie = importer.import(&mut store, "tt1375666").await.unwrap();
        assert_eq!(movie.director, nolan);
        assert_eq!(store.directors().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_check_ignores_case() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![inception()]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
        let director = store.find_or_create_director("Someone").unwrap();
        store
            .add_or_update_movie(MovieInput {
                title: "INCEPTION".to_string(),
                year: Some(2010),
                duration: Some(148),
                genre: "Action".to_string(),
                rating: Some(9.0),
                director: Some(director),
                ..MovieInput::default()
            })
            .unwrap();

        let result = importer.import(&mut store, "tt1375666").await;
        assert!(matches!(result, Err(ImportError::Duplicate { .. })));
        assert_eq!(store.directors().len(), 1);
    }

    #[tokio::test]
    async fn test_api_failure_changes_nothing() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();

        let result = importer.import(&mut store, "tt404").await;
        match result {
            Err(ImportError::Api(ApiError::Provider(message))) => assert_eq!(message, "Incorrect IMDb ID."),
            other => panic!("expected api error, got {:?}", other),
        }
        assert!(store.movies().is_empty());
        assert!(store.directors().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_year_creates_no_director() {
        let mut detail = sparse();
        detail.year = "1895".to_string();
        detail.director = "Louis Lumière".to_string();
        let importer = MovieImporter::new(FakeDatabase::with(vec![detail]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();

        let result = importer.import(&mut store, "tt0000002").await;
        match result {
            Err(ImportError::Catalog(CatalogError::Validation(errors))) => assert!(errors.has_field("year")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.directors().is_empty());
    }

    #[tokio::test]
    async fn test_sparse_import_uses_defaults() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![sparse()]));
        let mut store = CatalogStore::load(MemoryStore::new()).unwrap();

        let movie = importer.import(&mut store, "tt0000002").await.unwrap();
        assert_eq!(movie.duration, 120);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.poster, PLACEHOLDER_POSTER);
        assert_ne!(movie.director, DirectorId(0));
        assert_eq!(store.director(movie.director).unwrap().name, UNKNOWN_DIRECTOR);
    }

    #[tokio::test]
    async fn test_search() {
        let importer = MovieImporter::new(FakeDatabase::with(vec![inception(), sparse()]));

        let hits: Vec<SearchHit> = importer.search("incep").await.unwrap().collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].external_id, "tt1375666");

        let missing = importer.search("zzz").await;
        assert!(matches!(missing, Err(ImportError::Api(ApiError::Provider(_)))));

        assert!(matches!(importer.search("   ").await, Err(ImportError::EmptyQuery)));
    }
}

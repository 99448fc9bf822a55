use super::*;
use crate::storage::{JsonFileStore, MemoryStore};
use tempfile::tempdir;

/// Accepts reads, refuses every write
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

/// Refuses writes to the movie collection only
struct MoviesReadOnlyStore(MemoryStore);

impl KeyValueStore for MoviesReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == MOVIES_KEY {
            return Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.0.set(key, value)
    }
}

fn store_with_director() -> (CatalogStore<MemoryStore>, DirectorId) {
    let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
    let director = store
        .add_or_update_director(DirectorInput {
            id: None,
            name: "Denis Villeneuve".to_string(),
            nationality: "Canadian".to_string(),
            bio: Some("Arrival, Dune".to_string()),
        })
        .unwrap();
    (store, director.id)
}

fn movie_input(title: &str, year: i32, rating: f64, director: DirectorId) -> MovieInput {
    MovieInput {
        id: None,
        title: title.to_string(),
        year: Some(year),
        duration: Some(120),
        genre: "Science-Fiction".to_string(),
        rating: Some(rating),
        director: Some(director),
        synopsis: Some("Linguists and aliens".to_string()),
        poster: None,
    }
}

#[test]
fn test_added_movie_is_listed_as_entered() {
    let (mut store, director) = store_with_director();
    let input = movie_input("Arrival", 2016, 7.9, director);
    let saved = store.add_or_update_movie(input.clone()).unwrap();

    let listed = store.list_movies("", "", "");
    assert_eq!(listed.len(), 1);
    let movie = listed[0];
    assert_eq!(movie, &saved);
    assert_eq!(movie.title, input.title);
    assert_eq!(Some(movie.year), input.year);
    assert_eq!(Some(movie.duration as i32), input.duration);
    assert_eq!(movie.genre, input.genre);
    assert_eq!(Some(movie.rating), input.rating);
    assert_eq!(Some(movie.director), input.director);
    assert_eq!(movie.synopsis, input.synopsis);
    assert_eq!(movie.poster, PLACEHOLDER_POSTER);
}

#[test]
fn test_update_keeps_id_position_and_created_at() {
    let (mut store, director) = store_with_director();
    let first = store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    store.add_or_update_movie(movie_input("Sicario", 2015, 7.6, director)).unwrap();

    let mut edit = MovieInput::from(&first);
    edit.rating = Some(8.1);
    edit.poster = Some("https://img/arrival.jpg".to_string());
    let updated = store.add_or_update_movie(edit).unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(store.movies().len(), 2);
    assert_eq!(store.movies()[0].rating, 8.1);
    assert_eq!(store.movies()[0].poster, "https://img/arrival.jpg");
}

#[test]
fn test_update_with_unknown_id_creates_new_record() {
    let (mut store, director) = store_with_director();
    let mut input = movie_input("Enemy", 2013, 6.9, director);
    input.id = Some(MovieId(5));
    let saved = store.add_or_update_movie(input).unwrap();
    assert_ne!(saved.id, MovieId(5));
    assert_eq!(store.movies().len(), 1);
}

#[test]
fn test_invalid_movie_reports_all_errors_and_changes_nothing() {
    let (mut store, _) = store_with_director();
    let input = MovieInput {
        title: " ".to_string(),
        year: Some(1850),
        ..MovieInput::default()
    };

    match store.add_or_update_movie(input) {
        Err(CatalogError::Validation(errors)) => {
            assert_eq!(errors.len(), 6);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(store.movies().is_empty());
    assert_eq!(store.storage().get(MOVIES_KEY).unwrap(), None);
}

#[test]
fn test_delete_movie_is_idempotent() {
    let (mut store, director) = store_with_director();
    let movie = store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();

    assert!(store.delete_movie(movie.id).unwrap());
    assert!(!store.delete_movie(movie.id).unwrap());
    assert!(store.movies().is_empty());
    assert_eq!(store.storage().get(MOVIES_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_referenced_director_cannot_be_deleted() {
    let (mut store, director) = store_with_director();
    store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    let movies_before = store.movies().to_vec();
    let directors_before = store.directors().to_vec();

    match store.delete_director(director) {
        Err(CatalogError::ReferentialIntegrity { director: id, movie_count }) => {
            assert_eq!(id, director);
            assert_eq!(movie_count, 1);
        }
        other => panic!("expected referential integrity error, got {:?}", other),
    }
    assert_eq!(store.movies(), movies_before.as_slice());
    assert_eq!(store.directors(), directors_before.as_slice());
}

#[test]
fn test_unreferenced_director_is_deleted() {
    let (mut store, director) = store_with_director();
    assert!(store.delete_director(director).unwrap());
    assert!(store.directors().is_empty());
    assert!(!store.delete_director(director).unwrap());
}

#[test]
fn test_director_becomes_deletable_after_its_movies_go() {
    let (mut store, director) = store_with_director();
    let movie = store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    assert!(store.delete_director(director).is_err());
    store.delete_movie(movie.id).unwrap();
    assert!(store.delete_director(director).unwrap());
}

#[test]
fn test_find_or_create_director_is_idempotent() {
    let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
    let first = store.find_or_create_director("Jane Doe").unwrap();
    let second = store.find_or_create_director("Jane Doe").unwrap();
    let third = store.find_or_create_director("jane doe").unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(store.directors().len(), 1);

    let created = store.director(first).unwrap();
    assert_eq!(created.nationality, UNKNOWN_NATIONALITY);
    assert_eq!(created.bio, "");
}

#[test]
fn test_director_update_replaces_in_place() {
    let (mut store, director) = store_with_director();
    let mut edit = DirectorInput::from(store.director(director).unwrap());
    edit.nationality = "Québécois".to_string();
    store.add_or_update_director(edit).unwrap();

    assert_eq!(store.directors().len(), 1);
    assert_eq!(store.directors()[0].id, director);
    assert_eq!(store.directors()[0].nationality, "Québécois");
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let (mut store, director) = store_with_director();
    let first = store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    store.delete_movie(first.id).unwrap();
    let second = store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    assert!(second.id > first.id);
    assert!(second.id.value() > director.value());
}

#[test]
fn test_round_trip_through_storage() {
    let (mut store, director) = store_with_director();
    store.add_or_update_movie(movie_input("Arrival", 2016, 7.9, director)).unwrap();
    store.add_or_update_movie(movie_input("Sicario", 2015, 7.6, director)).unwrap();
    store.find_or_create_director("Jane Doe").unwrap();

    let movies = store.movies().to_vec();
    let directors = store.directors().to_vec();

    let reloaded = CatalogStore::load(store.into_storage()).unwrap();
    assert_eq!(reloaded.movies(), movies.as_slice());
    assert_eq!(reloaded.directors(), directors.as_slice());
}

#[test]
fn test_round_trip_through_files() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(JsonFileStore::new(dir.path())).unwrap();
    store.seed_default_directors().unwrap();
    let saved = store
        .add_or_update_movie(movie_input("Jaws", 1975, 8.1, DirectorId(3)))
        .unwrap();

    let reloaded = CatalogStore::load(JsonFileStore::new(dir.path())).unwrap();
    assert_eq!(reloaded.movies(), &[saved]);
    assert_eq!(reloaded.directors().len(), 4);
    assert!(dir.path().join("movies.json").exists());
    assert!(dir.path().join("directors.json").exists());
}

#[test]
fn test_seed_only_when_empty() {
    let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
    assert!(store.seed_default_directors().unwrap());
    assert_eq!(store.directors().len(), 4);
    assert_eq!(store.directors()[1].name, "Quentin Tarantino");
    assert!(!store.seed_default_directors().unwrap());
    assert_eq!(store.directors().len(), 4);
}

#[test]
fn test_failed_write_leaves_catalog_unchanged() {
    let seeded = MemoryStore::new().with_entry(
        DIRECTORS_KEY,
        r#"[{"id": 1, "name": "Paul Feig", "nationality": "American", "bio": ""}]"#,
    );
    let mut store = CatalogStore::load(ReadOnlyStore(seeded)).unwrap();

    let result = store.add_or_update_movie(movie_input("Spy", 2015, 7.0, DirectorId(1)));
    assert!(matches!(result, Err(CatalogError::Storage(_))));
    assert!(store.movies().is_empty());

    assert!(store.find_or_create_director("Someone New").is_err());
    assert_eq!(store.directors().len(), 1);
}

#[test]
fn test_text_director_keys_are_normalized_on_load() {
    let storage = MemoryStore::new()
        .with_entry(
            DIRECTORS_KEY,
            r#"[{"id": 1700000000000, "name": "Greta Gerwig", "nationality": "American", "bio": ""}]"#,
        )
        .with_entry(
            MOVIES_KEY,
            r#"[{"id": 1700000000001, "title": "Lady Bird", "year": 2017, "duration": 94,
                 "genre": "Comedy", "rating": 7.4, "director": "1700000000000",
                 "synopsis": "", "poster": "https://img/ladybird.jpg",
                 "createdAt": "2024-01-05T12:00:00.000Z"}]"#,
        );

    let mut store = CatalogStore::load(storage).unwrap();
    let director = DirectorId(1700000000000);
    assert_eq!(store.movie_count_for_director(director), 1);
    assert!(matches!(
        store.delete_director(director),
        Err(CatalogError::ReferentialIntegrity { .. })
    ));
}

#[test]
fn test_views_through_store() {
    let (mut store, director) = store_with_director();
    store.add_or_update_movie(movie_input("Arrival", 2016, 8.0, director)).unwrap();
    store.add_or_update_movie(movie_input("Dune: Part Two", 2024, 6.0, director)).unwrap();

    let summary = store.dashboard_summary();
    assert_eq!(summary.average_rating, "7.0");
    assert_eq!(summary.recent_movie_count, 1);
    assert_eq!(summary.director_count, 1);

    assert_eq!(store.top_rated_movies(1)[0].title, "Arrival");
    let sci_fi = store
        .genre_counts()
        .into_iter()
        .find(|c| c.genre == movie_catalog_models::Genre::ScienceFiction)
        .unwrap();
    assert_eq!(sci_fi.count, 2);
    assert_eq!(store.director_rows()[0].movie_count, 2);

    let years: Vec<i32> = store.list_movies("", "", "year-desc").iter().map(|m| m.year).collect();
    assert_eq!(years, vec![2024, 2016]);
}

#[test]
fn test_unreadable_record_does_not_wipe_the_others() {
    let storage = MemoryStore::new()
        .with_entry(
            DIRECTORS_KEY,
            r#"[{"id": 1, "name": "Paul Feig", "nationality": "American", "bio": ""}]"#,
        )
        .with_entry(
            MOVIES_KEY,
            r#"[{"id": 10, "title": "Spy", "year": 2015, "duration": 120, "genre": "Comedy",
                 "rating": 7.0, "director": 1, "createdAt": "2024-01-05T12:00:00Z"},
                {"id": 11, "title": "Lost Reel", "year": null, "duration": 120, "genre": "Drama",
                 "rating": 0, "director": 1, "createdAt": "2024-01-05T12:00:00Z"}]"#,
        );

    let mut store = CatalogStore::load(storage).unwrap();
    assert_eq!(store.movies().len(), 1);
    assert_eq!(store.movies()[0].title, "Spy");

    assert!(!store.delete_movie(MovieId(999)).unwrap());
    let reloaded = CatalogStore::load(store.into_storage()).unwrap();
    assert_eq!(reloaded.movies().len(), 1);
    assert_eq!(reloaded.movies()[0].id, MovieId(10));
    assert!(reloaded.storage().get("movies.bak").unwrap().is_some());
}

#[test]
fn test_movie_with_new_director_name_adds_both() {
    let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
    let mut input = movie_input("Arrival", 2016, 7.9, DirectorId(0));
    input.director = None;

    let movie = store.add_movie_with_director_name(input, "Denis Villeneuve").unwrap();
    assert_eq!(store.directors().len(), 1);
    assert_eq!(store.directors()[0].nationality, UNKNOWN_NATIONALITY);
    assert_eq!(movie.director, store.directors()[0].id);

    let again = movie_input("Sicario", 2015, 7.6, DirectorId(0));
    let second = store.add_movie_with_director_name(again, "denis villeneuve").unwrap();
    assert_eq!(second.director, movie.director);
    assert_eq!(store.directors().len(), 1);
}

#[test]
fn test_failed_movie_write_leaves_no_orphan_director() {
    let mut store = CatalogStore::load(MoviesReadOnlyStore(MemoryStore::new())).unwrap();
    let input = movie_input("Arrival", 2016, 7.9, DirectorId(0));

    let result = store.add_movie_with_director_name(input, "Denis Villeneuve");
    assert!(matches!(result, Err(CatalogError::Storage(_))));
    assert!(store.directors().is_empty());
    assert!(store.movies().is_empty());
    assert_eq!(store.storage().get(DIRECTORS_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_invalid_movie_with_new_director_name_creates_nothing() {
    let mut store = CatalogStore::load(MemoryStore::new()).unwrap();
    let input = movie_input("", 2016, 7.9, DirectorId(0));

    let result = store.add_movie_with_director_name(input, "Denis Villeneuve");
    assert!(matches!(result, Err(CatalogError::Validation(ref e)) if e.has_field("title")));
    assert!(store.directors().is_empty());
    assert_eq!(store.storage().get(DIRECTORS_KEY).unwrap(), None);
}

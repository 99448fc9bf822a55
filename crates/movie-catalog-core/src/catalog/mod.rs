mod seed;

#[cfg(test)]
mod tests;

pub use seed::default_directors;

use crate::error::{CatalogError, StorageError};
use crate::ids::IdGenerator;
use crate::storage::{load_collection, save_collection, KeyValueStore, DIRECTORS_KEY, MOVIES_KEY};
use crate::validation::{validate_director, validate_movie};
use crate::views::{self, DashboardSummary, DirectorRow, GenreCount, MovieDetailView, RatingPoint, SortKey};
use chrono::Utc;
use movie_catalog_models::{
    Director, DirectorId, DirectorInput, Movie, MovieId, MovieInput, PLACEHOLDER_POSTER,
};
use tracing::{debug, info, warn};

/// Nationality given to directors created from a bare name
pub const UNKNOWN_NATIONALITY: &str = "Unknown";

/// Owns the movie and director collections for a session.
///
/// Every mutation rewrites the whole affected collection to storage before
/// the in-memory copy is replaced, so a failed write leaves the catalog as
/// it was.
pub struct CatalogStore<S: KeyValueStore> {
    storage: S,
    movies: Vec<Movie>,
    directors: Vec<Director>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Read both collections from storage
    pub fn load(mut storage: S) -> Result<Self, StorageError> {
        let movies: Vec<Movie> = load_collection(&mut storage, MOVIES_KEY)?;
        let directors: Vec<Director> = load_collection(&mut storage, DIRECTORS_KEY)?;

        let highest_id = movies
            .iter()
            .map(|m| m.id.value())
            .chain(directors.iter().map(|d| d.id.value()))
            .max()
            .unwrap_or(0);

        info!(
            "Loaded catalog: {} movies, {} directors",
            movies.len(),
            directors.len()
        );

        Ok(Self {
            storage,
            movies,
            directors,
            ids: IdGenerator::starting_after(highest_id),
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn directors(&self) -> &[Director] {
        &self.directors
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn director(&self, id: DirectorId) -> Option<&Director> {
        self.directors.iter().find(|d| d.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Seed the stock directors when there are none. Returns whether it did.
    pub fn seed_default_directors(&mut self) -> Result<bool, CatalogError> {
        if !self.directors.is_empty() {
            return Ok(false);
        }
        let seeded = default_directors();
        info!("Seeding {} default directors", seeded.len());
        self.commit_directors(seeded)?;
        Ok(true)
    }

    pub fn add_or_update_movie(&mut self, input: MovieInput) -> Result<Movie, CatalogError> {
        let (movies, movie, updated) = Self::upsert_movie(&self.movies, &self.directors, &mut self.ids, input)?;
        self.commit_movies(movies)?;

        if updated {
            info!("Updated movie {} ({})", movie.id, movie.title);
        } else {
            info!("Added movie {} ({})", movie.id, movie.title);
        }
        Ok(movie)
    }

    /// Add or update a movie whose director is given by name, creating an
    /// `"Unknown"` nationality director when no name matches (case-insensitive).
    ///
    /// A new director and the movie are committed together: when the movie
    /// write fails, the previous director list is written back and neither
    /// change is kept.
    pub fn add_movie_with_director_name(
        &mut self,
        mut input: MovieInput,
        director_name: &str,
    ) -> Result<Movie, CatalogError> {
        if let Some(existing) = self.find_director_by_name(director_name) {
            input.director = Some(existing);
            return self.add_or_update_movie(input);
        }

        let director = Self::new_director(&mut self.ids, director_name)?;
        let mut directors = self.directors.clone();
        directors.push(director.clone());
        input.director = Some(director.id);

        let (movies, movie, _) = Self::upsert_movie(&self.movies, &directors, &mut self.ids, input)?;

        save_collection(&mut self.storage, DIRECTORS_KEY, &directors)?;
        if let Err(e) = save_collection(&mut self.storage, MOVIES_KEY, &movies) {
            if let Err(restore_err) = save_collection(&mut self.storage, DIRECTORS_KEY, &self.directors) {
                warn!("Failed to restore directors after a failed movie write: {}", restore_err);
            }
            return Err(e.into());
        }
        self.directors = directors;
        self.movies = movies;

        info!(
            "Added movie {} ({}) with new director {} ({})",
            movie.id, movie.title, director.id, director.name
        );
        Ok(movie)
    }

    /// Remove a movie. Returns whether anything was removed.
    pub fn delete_movie(&mut self, id: MovieId) -> Result<bool, CatalogError> {
        let movies: Vec<Movie> = self.movies.iter().filter(|m| m.id != id).cloned().collect();
        let removed = movies.len() != self.movies.len();
        self.commit_movies(movies)?;

        if removed {
            info!("Deleted movie {}", id);
        } else {
            debug!("Delete of movie {} ignored (not found)", id);
        }
        Ok(removed)
    }

    pub fn add_or_update_director(&mut self, input: DirectorInput) -> Result<Director, CatalogError> {
        let valid = validate_director(&input)?;

        let existing = input
            .id
            .and_then(|id| self.directors.iter().position(|d| d.id == id));

        let id = match existing {
            Some(index) => self.directors[index].id,
            None => DirectorId(self.ids.next_id()),
        };

        let director = Director {
            id,
            name: valid.name,
            nationality: valid.nationality,
            bio: valid.bio,
        };

        let mut directors = self.directors.clone();
        match existing {
            Some(index) => directors[index] = director.clone(),
            None => directors.push(director.clone()),
        }
        self.commit_directors(directors)?;

        info!("Saved director {} ({})", director.id, director.name);
        Ok(director)
    }

    /// Remove a director that no movie references. Returns whether anything
    /// was removed.
    pub fn delete_director(&mut self, id: DirectorId) -> Result<bool, CatalogError> {
        let movie_count = views::movie_count_for_director(&self.movies, id);
        if movie_count > 0 {
            return Err(CatalogError::ReferentialIntegrity {
                director: id,
                movie_count,
            });
        }

        let directors: Vec<Director> = self.directors.iter().filter(|d| d.id != id).cloned().collect();
        let removed = directors.len() != self.directors.len();
        self.commit_directors(directors)?;

        if removed {
            info!("Deleted director {}", id);
        }
        Ok(removed)
    }

    /// Case-insensitive lookup by name, creating the director when missing
    pub fn find_or_create_director(&mut self, name: &str) -> Result<DirectorId, CatalogError> {
        if let Some(existing) = self.find_director_by_name(name) {
            return Ok(existing);
        }

        let director = Self::new_director(&mut self.ids, name)?;
        let mut directors = self.directors.clone();
        directors.push(director.clone());
        self.commit_directors(directors)?;

        info!("Created director {} ({})", director.id, director.name);
        Ok(director.id)
    }

    fn find_director_by_name(&self, name: &str) -> Option<DirectorId> {
        let wanted = name.trim().to_lowercase();
        self.directors
            .iter()
            .find(|d| d.name.trim().to_lowercase() == wanted)
            .map(|d| d.id)
    }

    fn new_director(ids: &mut IdGenerator, name: &str) -> Result<Director, CatalogError> {
        let valid = validate_director(&DirectorInput {
            id: None,
            name: name.to_string(),
            nationality: UNKNOWN_NATIONALITY.to_string(),
            bio: None,
        })?;
        Ok(Director {
            id: DirectorId(ids.next_id()),
            name: valid.name,
            nationality: valid.nationality,
            bio: valid.bio,
        })
    }

    /// Validate `input` against `directors` and return the movie list with
    /// the record replaced or appended, the record, and whether it replaced one
    fn upsert_movie(
        movies: &[Movie],
        directors: &[Director],
        ids: &mut IdGenerator,
        input: MovieInput,
    ) -> Result<(Vec<Movie>, Movie, bool), CatalogError> {
        let valid = validate_movie(&input, directors)?;

        let existing = input.id.and_then(|id| movies.iter().position(|m| m.id == id));

        let (id, created_at) = match existing {
            Some(index) => (movies[index].id, movies[index].created_at),
            None => (MovieId(ids.next_id()), Utc::now()),
        };

        let movie = Movie {
            id,
            title: valid.title,
            year: valid.year,
            duration: valid.duration,
            genre: valid.genre,
            rating: valid.rating,
            director: valid.director,
            synopsis: valid.synopsis,
            poster: valid.poster.unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
            created_at,
        };

        let mut updated = movies.to_vec();
        match existing {
            Some(index) => updated[index] = movie.clone(),
            None => updated.push(movie.clone()),
        }
        Ok((updated, movie, existing.is_some()))
    }

    pub fn list_movies(&self, search_term: &str, genre_filter: &str, sort_key: &str) -> Vec<&Movie> {
        views::list_movies(&self.movies, search_term, genre_filter, SortKey::parse(sort_key))
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        views::dashboard_summary(&self.movies, &self.directors)
    }

    pub fn genre_counts(&self) -> Vec<GenreCount> {
        views::genre_counts(&self.movies)
    }

    pub fn top_rated_movies(&self, n: usize) -> Vec<&Movie> {
        views::top_rated_movies(&self.movies, n)
    }

    pub fn movie_count_for_director(&self, id: DirectorId) -> usize {
        views::movie_count_for_director(&self.movies, id)
    }

    pub fn director_rows(&self) -> Vec<DirectorRow<'_>> {
        views::director_rows(&self.movies, &self.directors)
    }

    pub fn rating_chart(&self, n: usize) -> Vec<RatingPoint> {
        views::rating_chart(&self.movies, n)
    }

    pub fn movie_detail(&self, id: MovieId) -> Option<MovieDetailView<'_>> {
        views::movie_detail(&self.movies, &self.directors, id)
    }

    fn commit_movies(&mut self, movies: Vec<Movie>) -> Result<(), StorageError> {
        save_collection(&mut self.storage, MOVIES_KEY, &movies)?;
        self.movies = movies;
        Ok(())
    }

    fn commit_directors(&mut self, directors: Vec<Director>) -> Result<(), StorageError> {
        save_collection(&mut self.storage, DIRECTORS_KEY, &directors)?;
        self.directors = directors;
        Ok(())
    }
}

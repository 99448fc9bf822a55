pub mod catalog;
pub mod error;
pub mod ids;
pub mod import;
pub mod storage;
pub mod validation;
pub mod views;

pub use catalog::CatalogStore;
pub use error::{CatalogError, FieldError, ImportError, StorageError, ValidationErrors};
pub use import::MovieImporter;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, DIRECTORS_KEY, MOVIES_KEY};
pub use views::{DashboardSummary, DirectorRow, GenreCount, MovieDetailView, RatingPoint, SortKey};

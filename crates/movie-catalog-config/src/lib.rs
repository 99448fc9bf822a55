pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, DisplayConfig, OmdbConfig, StorageConfig, DEFAULT_OMDB_BASE_URL};
pub use credentials::CredentialStore;
pub use paths::{base_path_override, PathManager};

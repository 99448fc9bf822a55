use crate::paths::PathManager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Where the `movies` and `directors` blobs live. Defaults to the data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Seed the stock directors when the director list is empty on startup
    #[serde(default = "default_true")]
    pub seed_default_directors: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// How many movies the dashboard's top-rated list shows
    #[serde(default = "default_top_rated_count")]
    pub top_rated_count: usize,
}

fn default_true() -> bool {
    true
}

fn default_omdb_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_top_rated_count() -> usize {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_default_directors: default_true(),
        }
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_omdb_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_rated_count: default_top_rated_count(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_seconds must be greater than zero"));
        }

        let base_url = self.omdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", base_url));
        }

        if self.display.top_rated_count == 0 {
            return Err(anyhow::anyhow!("display.top_rated_count must be greater than zero"));
        }

        Ok(())
    }

    /// Directory holding the persisted catalog
    pub fn data_dir(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| paths.data_dir().to_path_buf())
    }
}

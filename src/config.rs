use serde::Deserialize;

use crate::services::listing;

/// Durable storage backend for the watchlist and ratings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `storage_dir`
    File,
    /// Process memory only, nothing survives a restart
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Remote catalog endpoint fetched once at startup
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Optional timeout for the catalog fetch; unset means wait indefinitely
    #[serde(default)]
    pub catalog_timeout_secs: Option<u64>,

    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    /// Directory holding `watchlist.json` and `ratings.json`
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Number of movies per home feed page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Number of entries shown on the most-watched listing
    #[serde(default = "default_most_watched_limit")]
    pub most_watched_limit: usize,

    /// Keep the simulated popularity ranking fixed for the whole session
    #[serde(default)]
    pub stable_popularity: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_url() -> String {
    "https://fooapi.com/api/movies".to_string()
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_storage_dir() -> String {
    ".movie-hub".to_string()
}

fn default_page_size() -> usize {
    listing::DEFAULT_PAGE_SIZE
}

fn default_most_watched_limit() -> usize {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            catalog_timeout_secs: None,
            storage_backend: default_storage_backend(),
            storage_dir: default_storage_dir(),
            page_size: default_page_size(),
            most_watched_limit: default_most_watched_limit(),
            stable_popularity: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be greater than zero");
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

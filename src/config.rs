// src/config.rs
//
// Application configuration
//
// Sources, later ones win:
// 1. Built-in defaults
// 2. TOML file (`moviehub.toml` in the working directory, or $MOVIEHUB_CONFIG)
// 3. Environment variables (a `.env` file is loaded by the binary)

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_CONFIG_FILE: &str = "moviehub.toml";
const DEFAULT_POLL_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub maintenance: MaintenanceConfig,
    pub appwrite: Option<AppwriteConfig>,
    /// Where the local database and device id live
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// URL returning a JSON boolean; no remote flag when unset
    pub flag_url: Option<String>,
    pub poll_interval_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            flag_url: None,
            poll_interval_secs: DEFAULT_POLL_SECS,
        }
    }
}

impl MaintenanceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
}

impl AppConfig {
    /// Load configuration from the default file location and the process
    /// environment
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("MOVIEHUB_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            log::debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env(&std::env::vars().collect());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_ref = path.as_ref();
        log::debug!("Loading configuration from {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path_ref, e))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| AppError::Config(format!("{:?}: {}", path_ref, e)))
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) {
        let get = |name: &str| vars.get(name).filter(|v| !v.trim().is_empty()).cloned();

        if let Some(key) = get("TMDB_API_KEY") {
            self.tmdb.api_key = key;
        }
        if let Some(url) = get("TMDB_BASE_URL") {
            self.tmdb.base_url = url;
        }
        if let Some(dir) = get("MOVIEHUB_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = get("MAINTENANCE_FLAG_URL") {
            self.maintenance.flag_url = Some(url);
        }
        if let Some(secs) = get("MAINTENANCE_POLL_SECS") {
            match secs.parse() {
                Ok(secs) => self.maintenance.poll_interval_secs = secs,
                Err(_) => log::warn!("Ignoring invalid MAINTENANCE_POLL_SECS={}", secs),
            }
        }

        let appwrite = (
            get("APPWRITE_ENDPOINT"),
            get("APPWRITE_PROJECT_ID"),
            get("APPWRITE_API_KEY"),
            get("APPWRITE_DATABASE_ID"),
            get("APPWRITE_COLLECTION_ID"),
        );
        if let (
            Some(endpoint),
            Some(project_id),
            Some(api_key),
            Some(database_id),
            Some(collection_id),
        ) = appwrite
        {
            self.appwrite = Some(AppwriteConfig {
                endpoint,
                project_id,
                api_key,
                database_id,
                collection_id,
            });
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "TMDB API key is missing (set TMDB_API_KEY or [tmdb].api_key)".to_string(),
            ));
        }
        if self.tmdb.base_url.trim().is_empty() {
            return Err(AppError::Config("TMDB base URL cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Configured data directory, or the platform data dir
    pub fn resolve_data_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("moviehub"))
            .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))
    }
}

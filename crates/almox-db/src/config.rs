//! # Configuration
//!
//! Where the database lives and whether a fresh install gets sample data.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ALMOX_DB_PATH=/srv/almox/almox.db                                  │
//! │     ALMOX_MAX_CONNECTIONS=5                                            │
//! │     ALMOX_SAMPLE_DATA=false                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/almox/almox.toml (Linux)                                 │
//! │     ~/Library/Application Support/br.hospital.almox/almox.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! database_path = "/var/lib/almox/almox.db"
//! max_connections = 5
//! connect_timeout_secs = 30
//!
//! [seed]
//! sample_data = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

pub const ENV_DB_PATH: &str = "ALMOX_DB_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "ALMOX_MAX_CONNECTIONS";
pub const ENV_SAMPLE_DATA: &str = "ALMOX_SAMPLE_DATA";

const CONFIG_FILE_NAME: &str = "almox.toml";
const DATABASE_FILE_NAME: &str = "almox.db";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("br", "hospital", "almox")
}

// =============================================================================
// Storage Settings
// =============================================================================

/// SQLite file and pool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path to the SQLite database file. `:memory:` for a throwaway database.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// =============================================================================
// Seed Settings
// =============================================================================

/// First-run data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Seed the sample catalog when no inventory is stored.
    ///
    /// Default accounts are seeded regardless, so someone can log in.
    #[serde(default = "default_sample_data")]
    pub sample_data: bool,
}

fn default_sample_data() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        SeedSettings {
            sample_data: default_sample_data(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete Almox configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub seed: SeedSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// `config_path` falls back to `almox.toml` in the platform config
    /// directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> DbResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> DbResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DbResult<()> {
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(DbError::Config("database_path must not be empty".into()));
        }

        if self.storage.max_connections == 0 {
            return Err(DbError::Config(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Unparsable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = PathBuf::from(path);
        }

        if let Some(max) = lookup(ENV_MAX_CONNECTIONS) {
            match max.parse::<u32>() {
                Ok(max) => self.storage.max_connections = max,
                Err(_) => warn!(value = %max, "Ignoring invalid {}", ENV_MAX_CONNECTIONS),
            }
        }

        if let Some(flag) = lookup(ENV_SAMPLE_DATA) {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.seed.sample_data = true,
                "0" | "false" | "no" | "off" => self.seed.sample_data = false,
                _ => warn!(value = %flag, "Ignoring invalid {}", ENV_SAMPLE_DATA),
            }
        }
    }

    /// Returns the default config file path for the platform.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pool settings for [`crate::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        let config = if self.storage.database_path.as_os_str() == crate::pool::IN_MEMORY_PATH {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.storage.database_path)
                .max_connections(self.storage.max_connections)
        };

        config.connect_timeout(Duration::from_secs(self.storage.connect_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.seed.sample_data);
        assert_eq!(config.storage.max_connections, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [storage]
            database_path = "/srv/almox/almox.db"

            [seed]
            sample_data = false
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.database_path, PathBuf::from("/srv/almox/almox.db"));
        assert_eq!(config.storage.connect_timeout_secs, 30);
        assert!(!config.seed.sample_data);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let result = AppConfig::from_toml("[storage]\nmax_connections = \"many\"");
        assert!(matches!(result, Err(DbError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/tmp/override.db"),
            (ENV_MAX_CONNECTIONS, "not-a-number"),
            (ENV_SAMPLE_DATA, "off"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.storage.max_connections, 5);
        assert!(!config.seed.sample_data);
    }

    #[test]
    fn test_validate_rejects_zero_connections() {
        let mut config = AppConfig::default();
        config.storage.max_connections = 0;
        assert!(matches!(config.validate(), Err(DbError::Config(_))));
    }

    #[test]
    fn test_memory_path_maps_to_in_memory_pool() {
        let mut config = AppConfig::default();
        config.storage.database_path = PathBuf::from(":memory:");
        assert!(config.db_config().is_in_memory());
    }
}

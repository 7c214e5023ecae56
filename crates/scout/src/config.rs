use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use scout_core::table::DEFAULT_PAGE_SIZE;

/// Environment variable overriding `api.base_url`
pub const ENV_API_BASE_URL: &str = "SCOUT_API_BASE_URL";
/// Environment variable overriding `storage.data_dir`
pub const ENV_DATA_DIR: &str = "SCOUT_DATA_DIR";
/// Environment variable overriding `log_level`
pub const ENV_LOG_LEVEL: &str = "SCOUT_LOG_LEVEL";

/// Scout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Candidates API
    pub api: ApiConfig,

    /// Local persistence
    pub storage: StorageConfig,

    /// Table defaults
    pub table: TableConfig,

    /// Development login
    pub auth: AuthConfig,

    /// Log level
    pub log_level: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            table: TableConfig::default(),
            auth: AuthConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ScoutConfig {
    /// Load from a TOML configuration file
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Resolve the configuration the way the binary does.
    ///
    /// `.env` is loaded first, then the explicit file (which must exist) or the
    /// default file (if present), then environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from_file(&default)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `<config dir>/scout/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scout").join("config.toml"))
    }

    /// Apply `SCOUT_*` overrides obtained through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }

    /// Directory holding the persisted key-value file.
    ///
    /// Falls back to `<data dir>/scout`, or `.scout` when the platform has no
    /// data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("scout"))
                .unwrap_or_else(|| PathBuf::from(".scout"))
        })
    }
}

/// Candidates API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL serving /userlist, /roleslist and /messages
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory (defaults to the platform data directory)
    pub data_dir: Option<PathBuf>,
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Initial page size, one of 10, 20, 30
    pub default_page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Authentication configuration.
///
/// A single fixed credential pair stands in for real authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email: "recruiter@coto.com".to_string(),
            password: "123456".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[api]
base_url = "https://api.example.com"

[table]
default_page_size = 20
"#,
        )
        .unwrap();

        let config = ScoutConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.table.default_page_size, 20);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.auth, AuthConfig::default());
        assert_eq!(config.storage.data_dir, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api = 3").unwrap();

        assert!(ScoutConfig::load_from_file(&path).is_err());
        assert!(ScoutConfig::load_from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_BASE_URL, "http://mock:8080"),
            (ENV_DATA_DIR, "/tmp/scout-data"),
            (ENV_LOG_LEVEL, ""),
        ]);

        let mut config = ScoutConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://mock:8080");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/scout-data"));
        assert_eq!(config.log_level, "info");
    }
}

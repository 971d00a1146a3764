use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_engine::{ApiEndpoints, DetailLookup, EndpointError, FetchSettings};
use engine_logging::engine_info;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "comic_catalog.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("page_size must be at least 1")]
    ZeroPageSize,
    #[error("{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Deployment settings. Every field has a default, so an empty file
/// (`()`) is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub detail_lookup: DetailLookup,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            page_size: catalog_core::DEFAULT_PAGE_SIZE.get(),
            detail_lookup: DetailLookup::default(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_body_bytes: fetch.max_bytes,
        }
    }
}

impl CatalogConfig {
    /// Load `path`, or the default file if it exists, or built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn page_size(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.page_size).ok_or(ConfigError::ZeroPageSize)
    }

    pub fn endpoints(&self) -> Result<ApiEndpoints, ConfigError> {
        Ok(ApiEndpoints::new(&self.api_base_url)?)
    }

    pub fn fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        Ok(FetchSettings {
            connect_timeout: non_zero_secs("connect_timeout_secs", self.connect_timeout_secs)?,
            request_timeout: non_zero_secs("request_timeout_secs", self.request_timeout_secs)?,
            max_bytes: self.max_body_bytes,
            ..FetchSettings::default()
        })
    }
}

fn non_zero_secs(field: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout(field));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("catalog.ron");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig::from_file(&write(&dir, "()")).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.page_size().unwrap().get(), 100);
    }

    #[test]
    fn reads_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"(
                api_base_url: "https://catalog.example.com",
                page_size: 20,
                detail_lookup: record_endpoint,
                request_timeout_secs: 5,
            )"#,
        );
        let config = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(config.page_size().unwrap().get(), 20);
        assert_eq!(config.detail_lookup, DetailLookup::RecordEndpoint);
        assert_eq!(
            config.endpoints().unwrap().collection_url(),
            "https://catalog.example.com/api/comics"
        );
        assert_eq!(config.fetch_settings().unwrap().request_timeout, Duration::from_secs(5));
        assert_eq!(config.fetch_settings().unwrap().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig::from_file(&write(&dir, "(page_size: 0)")).unwrap();
        assert!(matches!(config.page_size(), Err(ConfigError::ZeroPageSize)));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let dir = TempDir::new().unwrap();
        let config =
            CatalogConfig::from_file(&write(&dir, "(request_timeout_secs: 0)")).unwrap();
        assert!(matches!(
            config.fetch_settings(),
            Err(ConfigError::ZeroTimeout("request_timeout_secs"))
        ));

        let config =
            CatalogConfig::from_file(&write(&dir, "(connect_timeout_secs: 0)")).unwrap();
        assert!(matches!(
            config.fetch_settings(),
            Err(ConfigError::ZeroTimeout("connect_timeout_secs"))
        ));
    }

    #[test]
    fn unknown_fields_are_errors() {
        let dir = TempDir::new().unwrap();
        let result = CatalogConfig::from_file(&write(&dir, "(items_per_page: 20)"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = CatalogConfig::load(Some(&dir.path().join("absent.ron")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crawlerx_engine::ApiSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "crawlerx.ron";
/// Overrides `api_base_url` when set and non-empty.
pub const API_URL_ENV: &str = "CRAWLERX_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Startup settings read from `crawlerx.ron`. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_prefix: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            api_prefix: api.api_prefix,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// `Ok(None)` when the file does not exist.
    pub fn read_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads `path`, falling back to defaults. The error, if any, is handed
    /// back so it can be logged once logging is up.
    pub fn load(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::read_from(path) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn with_env_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.map(|url| url.trim().to_string()) {
            if !url.is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        crawlerx_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            api_prefix: self.api_prefix.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, err) = AppConfig::load(&dir.path().join(CONFIG_FILENAME));
        assert!(err.is_none());
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.level_filter(), LevelFilter::Info);
        assert_eq!(config.log_destination, LogDestination::Both);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"(api_base_url: "https://crawl.example.com", log_level: "debug", log_destination: File)"#,
        );
        let (config, err) = AppConfig::load(&path);
        assert!(err.is_none());
        assert_eq!(config.api_base_url, "https://crawl.example.com");
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(config.api_prefix, "/api/v1");
    }

    #[test]
    fn broken_file_falls_back_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "(api_base_url: ");
        let (config, err) = AppConfig::load(&path);
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let config = AppConfig::default().with_env_override(Some(" http://10.0.0.5:9000 ".into()));
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");

        let config = AppConfig::default().with_env_override(Some("   ".into()));
        assert_eq!(config.api_base_url, "http://localhost:8080");

        let config = AppConfig::default().with_env_override(None);
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn unknown_level_is_info() {
        let config = AppConfig {
            log_level: "chatty".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn api_settings_carry_prefix_and_timeouts() {
        let config = AppConfig {
            api_prefix: String::new(),
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        let settings = config.api_settings();
        assert_eq!(settings.api_prefix, "");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(
            settings.endpoint(&["jobs"]).unwrap().as_str(),
            "http://localhost:8080/jobs"
        );
    }
}

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::Locale;
use crate::error::PickerError;

pub const DEFAULT_CONFIG_FILE: &str = "champ-picker.json";
pub const DEFAULT_BASE_URL: &str = "https://ddragon.leagueoflegends.com";
pub const DEFAULT_TILES_PER_ROW: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub tiles_per_row: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub cache_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub locale: Locale,
    pub tiles_per_row: usize,
    pub timeout: Duration,
    pub cache_dir: Option<Utf8PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: Locale::default(),
            tiles_per_row: DEFAULT_TILES_PER_ROW,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_dir: None,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, PickerError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| PickerError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| PickerError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, PickerError> {
        let defaults = ResolvedConfig::default();

        let base_url = config
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        if base_url.is_empty() {
            return Err(PickerError::ConfigParse("base_url must not be empty".to_string()));
        }

        let locale = config
            .locale
            .map(|value| value.parse::<Locale>())
            .transpose()?
            .unwrap_or(defaults.locale);

        let tiles_per_row = config.tiles_per_row.unwrap_or(defaults.tiles_per_row);
        if tiles_per_row == 0 {
            return Err(PickerError::ConfigParse(
                "tiles_per_row must be at least 1".to_string(),
            ));
        }

        let timeout = config
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(ResolvedConfig {
            base_url,
            locale,
            tiles_per_row,
            timeout,
            cache_dir: config.cache_dir.map(Utf8PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.locale.as_str(), "en_US");
        assert_eq!(resolved.tiles_per_row, 10);
        assert_eq!(resolved.timeout, Duration::from_secs(30));
        assert!(resolved.cache_dir.is_none());
    }

    #[test]
    fn zero_tiles_per_row_rejected() {
        let config = Config {
            tiles_per_row: Some(0),
            ..Config::default()
        };
        assert_matches!(
            ConfigLoader::resolve_config(config),
            Err(PickerError::ConfigParse(_))
        );
    }
}

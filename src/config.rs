use crate::client::DEFAULT_CATALOG_URL;
use crate::paths::AppPaths;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_QUERY: &str = "fiction";

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Query run once at startup to fill the list.
    #[serde(default = "default_query")]
    pub default_query: String,

    #[serde(default)]
    pub dark_theme: bool,

    #[serde(default)]
    pub allow_insecure_certs: bool,

    // Overridden by FOLIO_LOG
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            default_query: default_query(),
            dark_theme: false,
            allow_insecure_certs: false,
            log_level: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            return Ok(config);
        }
        Err(anyhow::anyhow!("Config file not found"))
    }

    /// The app runs fine without a config file; a broken one is logged and ignored.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                log::info!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get_path_string() -> Result<String> {
        let path = AppPaths::get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str("dark_theme = true\n").unwrap();
        assert!(cfg.dark_theme);
        assert_eq!(cfg.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(cfg.default_query, DEFAULT_QUERY);
        assert!(!cfg.allow_insecure_certs);
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let cfg = Config {
            catalog_url: "http://localhost:8080/books/v1".to_string(),
            default_query: "tolkien".to_string(),
            dark_theme: true,
            allow_insecure_certs: true,
            log_level: Some("debug".to_string()),
        };
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }
}

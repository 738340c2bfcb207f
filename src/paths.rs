// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

// Allow injecting a base path (from Android Context)
static ANDROID_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

pub struct AppPaths;

impl AppPaths {
    /// Initialize the Android data directory. Must be called once at startup.
    pub fn init_android_path(path: String) {
        let _ = ANDROID_DATA_DIR.set(PathBuf::from(path));
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "folio", "folio")
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    /// Base directory for `subdir` ("config" or "cache").
    fn resolve_base(subdir: &str) -> Option<PathBuf> {
        // 1. Android Override
        if let Some(android_root) = ANDROID_DATA_DIR.get() {
            return Some(android_root.join(subdir));
        }

        // 2. Test Override. Config and cache get separate subdirectories so
        // the log file never lands next to config.toml.
        if let Ok(test_dir) = env::var("FOLIO_TEST_DIR") {
            return Some(PathBuf::from(test_dir).join(subdir));
        }

        // 3. Standard OS location
        let proj = Self::get_proj_dirs()?;
        let dir = match subdir {
            "config" => proj.config_dir(),
            "cache" => proj.cache_dir(),
            _ => return None,
        };
        Some(dir.to_path_buf())
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("config")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_cache_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("cache")
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    /// Diagnostic log written by the terminal UI.
    pub fn get_log_file_path() -> Result<PathBuf> {
        Ok(Self::get_cache_dir()?.join("folio.log"))
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Top-level configuration stored on disk.
///
/// Everything is optional; a missing file means defaults. The only knob is
/// the API endpoint, useful for pointing the client at a mirror or a local
/// test server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Override for the observation API endpoint.
    ///
    /// Example TOML:
    /// endpoint = "https://aviationweather.gov/api/data/metar"
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metar-cli", "metar")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/metar/config.toml")).unwrap();
        assert!(cfg.endpoint.is_none());
    }

    #[test]
    fn endpoint_parses_from_toml() {
        let cfg: Config = toml::from_str(r#"endpoint = "http://localhost:8080/metar""#).unwrap();
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8080/metar"));
    }

    #[test]
    fn empty_toml_is_valid() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.endpoint.is_none());
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub base_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self { base_url: None }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: write the defaults so the file is there to edit
            let config = Self::new();
            config.save_to(path)?;
            return Ok(config);
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Resolve the chat endpoint: env var wins, then the config file, then
    /// the built-in default.
    pub fn endpoint(&self) -> String {
        std::env::var("CHATBOX_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("chatbox").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults_and_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatbox").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert!(config.base_url.is_none());
        // First load writes the default file
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.base_url.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_url: Some("http://example.com:9000".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some("http://example.com:9000"));
    }

    #[test]
    fn test_endpoint_falls_back_to_default() {
        let config = Config::new();
        assert_eq!(config.endpoint(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_endpoint_prefers_config_value() {
        let config = Config {
            base_url: Some("http://example.com".to_string()),
        };
        assert_eq!(config.endpoint(), "http://example.com");
    }
}

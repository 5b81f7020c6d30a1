//! Configuration management for Mentor

pub mod progress;

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the curriculum content tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<PathBuf>,

    /// Override for where progress is saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_file: Option<PathBuf>,

    /// Column at which lesson text is wrapped
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_wrap_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self { content_dir: None, progress_file: None, wrap_width: default_wrap_width() }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "mentor").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "mentor").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Where progress is saved: the configured override, else the data directory
    pub fn progress_path(&self) -> Result<PathBuf> {
        match &self.progress_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("progress.json")),
        }
    }

    /// Where content is read from: the configured directory, else `<data_dir>/content`
    pub fn content_path(&self) -> Result<PathBuf> {
        match &self.content_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("content")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_wraps_at_80() {
        let config = Config::default();
        assert_eq!(config.wrap_width, 80);
        assert!(config.content_dir.is_none());
    }

    #[test]
    fn config_serializes_without_unset_paths() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, r#"{"wrap_width":80}"#);
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{"content_dir":"/srv/lessons","progress_file":"/tmp/p.json"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.content_dir, Some(PathBuf::from("/srv/lessons")));
        assert_eq!(config.wrap_width, 80);
        assert_eq!(config.progress_path().unwrap(), PathBuf::from("/tmp/p.json"));
        assert_eq!(config.content_path().unwrap(), PathBuf::from("/srv/lessons"));
    }
}

//! TOML configuration with defaults written on first run.
//!
//! The file lives in the platform config directory and covers the Ollama
//! endpoint, the export directory, and the log level. Environment
//! variables override individual values after the file is read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ollama;

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_OLLAMA_URL: &str = "STUDYHUB_OLLAMA_URL";
pub const ENV_MODEL: &str = "STUDYHUB_MODEL";
pub const ENV_EXPORT_DIR: &str = "STUDYHUB_EXPORT_DIR";
pub const ENV_LOG: &str = "STUDYHUB_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Generation requests block up to this long before giving up.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Where exported results land. Supports a leading `~`.
    #[serde(default = "default_export_dir")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

impl ExportConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        expand_tilde(&self.directory)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_ollama_url() -> String {
    ollama::DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    ollama::DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_export_dir() -> String {
    "~/studyhub-exports".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How the active configuration came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLoadStatus {
    Loaded,
    CreatedDefault,
    /// The file was unreadable or invalid; defaults are in effect.
    FellBackToDefault { reason: String },
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    pub status: ConfigLoadStatus,
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "studyhub", "studyhub")
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = project_dirs().context("could not determine a config directory")?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load the config file, writing defaults first if it does not exist.
/// A broken file is reported, not fatal.
pub fn load_config() -> Result<LoadedConfig> {
    let path = default_config_path()?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        let config = Config::default();
        write_config(path, &config)?;
        info!(path = %path.display(), "created default config");
        return Ok(LoadedConfig {
            config: apply_env_overrides(config),
            path: path.to_path_buf(),
            status: ConfigLoadStatus::CreatedDefault,
        });
    }

    let (config, status) = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Config>(&raw) {
            Ok(config) => (config, ConfigLoadStatus::Loaded),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config file is invalid, using defaults");
                (
                    Config::default(),
                    ConfigLoadStatus::FellBackToDefault {
                        reason: format!("invalid TOML: {e}"),
                    },
                )
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config file is unreadable, using defaults");
            (
                Config::default(),
                ConfigLoadStatus::FellBackToDefault {
                    reason: format!("unreadable: {e}"),
                },
            )
        }
    };

    Ok(LoadedConfig {
        config: apply_env_overrides(config),
        path: path.to_path_buf(),
        status,
    })
}

pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(url) = std::env::var(ENV_OLLAMA_URL)
        && !url.is_empty()
    {
        config.ollama.url = url;
    }
    if let Ok(model) = std::env::var(ENV_MODEL)
        && !model.is_empty()
    {
        config.ollama.model = model;
    }
    if let Ok(dir) = std::env::var(ENV_EXPORT_DIR)
        && !dir.is_empty()
    {
        config.export.directory = dir;
    }
    if let Ok(level) = std::env::var(ENV_LOG)
        && !level.is_empty()
    {
        config.logging.level = level;
    }
    config
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert_eq!(config.ollama.model, "granite3.1-dense:2b");
        assert_eq!(config.ollama.timeout_secs, 120);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.status, ConfigLoadStatus::CreatedDefault);
        assert!(path.exists());

        // A second load reads the file it just wrote.
        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.status, ConfigLoadStatus::Loaded);
        assert_eq!(reloaded.config, loaded.config);
    }

    #[test]
    fn test_partial_file_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ollama]\nmodel = \"llama3:8b\"\n").unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.status, ConfigLoadStatus::Loaded);
        assert_eq!(loaded.config.ollama.model, "llama3:8b");
        assert_eq!(loaded.config.ollama.url, "http://localhost:11434");
        assert_eq!(loaded.config.logging.level, "info");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not toml [[[").unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert!(matches!(
            loaded.status,
            ConfigLoadStatus::FellBackToDefault { .. }
        ));
        assert_eq!(loaded.config.ollama.url, "http://localhost:11434");
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.ollama.timeout_secs = 60;
        config.export.directory = "/tmp/exports".to_string();
        write_config(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.config.ollama.timeout_secs, 60);
        assert_eq!(loaded.config.export.directory, "/tmp/exports");
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/exports"), home.join("exports"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }

    #[test]
    fn test_timeout_conversion() {
        let config = OllamaConfig {
            timeout_secs: 5,
            ..OllamaConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}

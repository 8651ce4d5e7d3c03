//! Configuration for taborder.
//!
//! Stored as YAML at `~/.config/taborder/config.yaml`. A missing file means
//! defaults; a file that exists but does not parse is an error.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operation messages
    #[default]
    Info,
    /// Every tracker mutation
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::Validation(format!(
                "unknown log level '{other}'"
            ))),
        }
    }
}

/// taborder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot file used for restart recovery (default: `<config dir>/last_order.yaml`)
    pub snapshot_path: Option<PathBuf>,
    /// Log verbosity when neither `--log-level` nor `RUST_LOG` is given
    pub log_level: LogLevel,
    /// Read the saved snapshot when no `--snapshot` is given
    pub restore_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            log_level: LogLevel::default(),
            restore_on_start: true,
        }
    }
}

impl Config {
    /// Load from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save to `path`, writing a temp file first and renaming it into place
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Directory holding the config and default snapshot
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("taborder")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("taborder")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Path of the config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Snapshot path, honouring the configured override
    pub fn resolved_snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(crate::snapshot::storage::snapshot_path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.snapshot_path
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "snapshot_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.restore_on_start);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "log_level: debug\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.restore_on_start);
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "log_level: [[[").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_snapshot_path_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "snapshot_path: ''\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");
        let config = Config {
            snapshot_path: Some(temp.path().join("order.yaml")),
            log_level: LogLevel::Warn,
            restore_on_start: false,
        };
        config.save_to(&path).unwrap();
        assert!(!path.with_extension("yaml.tmp").exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Off.to_level_filter(), log::LevelFilter::Off);
    }
}

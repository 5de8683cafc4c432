use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

const APP_DIR_NAME: &str = "streakcircle";
const CONFIG_FILE_NAME: &str = "app_config.json";

pub const CONFIG_PATH_ENV: &str = "STREAKCIRCLE_CONFIG";
pub const DATABASE_PATH_ENV: &str = "STREAKCIRCLE_DATABASE_PATH";
pub const LOG_DIR_ENV: &str = "STREAKCIRCLE_LOG_DIR";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(anyhow::anyhow!("Unknown log level: {}", other)),
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub database_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

/// Application configuration service
///
/// Resolution order for paths: environment override, then the config file,
/// then the platform data directory.
pub struct ConfigService {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigService {
    /// Load from `STREAKCIRCLE_CONFIG`, or `app_config.json` in the platform
    /// config directory
    pub fn load() -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .ok_or_else(|| anyhow::anyhow!("Failed to get config dir"))?
                .join(APP_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        };

        Self::from_path(config_path)
    }

    /// Load from an explicit file; a missing file yields defaults, a
    /// malformed one is an error
    pub fn from_path(config_path: PathBuf) -> Result<Self> {
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<AppConfig>(&content)
                .with_context(|| format!("Malformed config file {:?}", config_path))?
        } else {
            AppConfig::default()
        };

        info!("Config loaded from: {:?}", config_path);
        info!("Initial log level: {}", config.log_level.as_str());

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.config.log_level
    }

    /// Persist a new log level; it applies from the next start
    pub fn set_log_level(&mut self, level: LogLevel) -> Result<()> {
        self.config.log_level = level;

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.config_path, content)?;

        info!(
            "Log level {} saved to: {:?}",
            level.as_str(),
            self.config_path
        );

        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        let file_name = if cfg!(debug_assertions) {
            "streakcircle-dev.db"
        } else {
            "streakcircle.db"
        };
        resolve_path(
            std::env::var_os(DATABASE_PATH_ENV),
            self.config.database_path.as_ref(),
            || Ok(data_dir()?.join(file_name)),
        )
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        resolve_path(
            std::env::var_os(LOG_DIR_ENV),
            self.config.log_dir.as_ref(),
            || Ok(data_dir()?.join("logs")),
        )
    }
}

fn data_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to get app data directory"))?
        .join(APP_DIR_NAME))
}

fn resolve_path(
    env_override: Option<std::ffi::OsString>,
    configured: Option<&PathBuf>,
    fallback: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    match configured {
        Some(path) => Ok(path.clone()),
        None => fallback(),
    }
}

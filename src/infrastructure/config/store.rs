use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while locating, reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading or writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The config could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// The config file could not be parsed.
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Where a loaded configuration came from.
///
/// Loading usually happens before logging is set up, so the outcome is
/// returned and reported once a subscriber exists.
#[derive(Debug)]
pub enum ConfigSource {
    /// Read from an existing file.
    File(PathBuf),
    /// No file existed; defaults were written to this path.
    CreatedDefault(PathBuf),
    /// The file failed to parse; defaults are used instead.
    InvalidFallback {
        /// Path of the rejected file.
        path: PathBuf,
        /// Parse error.
        error: toml::de::Error,
    },
}

impl ConfigSource {
    /// Emits a log event describing the outcome.
    pub fn report(&self) {
        match self {
            Self::File(path) => info!(path = %path.display(), "Loaded config file"),
            Self::CreatedDefault(path) => {
                info!(path = %path.display(), "Config file not found, created default");
            }
            Self::InvalidFallback { path, error } => {
                warn!(path = %path.display(), %error, "Failed to parse config file. Using defaults.");
            }
        }
    }
}

/// Reads and writes the configuration file.
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Create a new `ConfigStore` rooted at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `ConfigStore` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Returns the configuration directory path.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the application configuration, writing defaults when no file exists.
    /// A file that fails to parse is replaced by defaults and reported through
    /// the returned [`ConfigSource`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            return Ok((default_config, ConfigSource::CreatedDefault(config_path)));
        }

        let content = fs::read_to_string(&config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok((config, ConfigSource::File(config_path))),
            Err(error) => Ok((
                AppConfig::default(),
                ConfigSource::InvalidFallback {
                    path: config_path,
                    error,
                },
            )),
        }
    }

    fn save_to_file(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }
}

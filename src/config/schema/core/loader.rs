use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::Config;
use crate::error::ConfigError;

pub const CONFIG_DIR_NAME: &str = ".response-composer";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `~/.response-composer/config.toml`, when a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|u| u.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Tilde-expand a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

impl Config {
    /// Explicit path must exist; the default path is optional. Environment
    /// overrides are applied last, then the result is validated. Nothing is
    /// ever written back.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load_from_path(&path)?,
                _ => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

mod composer;
mod core;
mod logging;

pub use self::core::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, Config, default_config_path, expand_path};
pub use composer::{ComposerConfig, OutputConfig};
pub use logging::{LogLevel, LoggingConfig};

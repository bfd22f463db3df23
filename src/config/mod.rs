pub mod schema;

pub use schema::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ComposerConfig, Config, LogLevel, LoggingConfig,
    OutputConfig, default_config_path, expand_path,
};

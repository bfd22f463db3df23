mod env_overrides;
mod loader;
#[cfg(test)]
pub(crate) mod test_env;
mod types;

pub use loader::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, default_config_path, expand_path};
pub use types::Config;

use super::{ConfigError, Settings, compile_settings};
use std::path::Path;
use tokio::fs::read_to_string;

/// Reads settings from a TOML file.
pub async fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    compile_settings(::toml::from_str(&read_to_string(path).await?)?)
}

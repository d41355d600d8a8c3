use super::{ConfigError, Settings};
use duration_string::DurationString;
use serde::{Deserialize, Serialize};

/// Serializable settings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableSettings {
    logger_level: Option<String>,
    debug: Option<DebugFlag>,
    version: Option<String>,
    logger_target: Option<String>,
    timeout: Option<DurationString>,
    max_redirects: Option<usize>,
    track_redirects: Option<bool>,
}

/// A debug flag written as either a boolean or a number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum DebugFlag {
    Boolean(bool),
    Number(u64),
}

impl DebugFlag {
    const fn enabled(self) -> bool {
        match self {
            Self::Boolean(flag) => flag,
            Self::Number(number) => number != 0,
        }
    }
}

/// Compiles serializable settings into settings.
///
/// Absent fields keep their default values.
pub fn compile_settings(settings: SerializableSettings) -> Result<Settings, ConfigError> {
    let mut compiled = Settings::default();

    if let Some(level) = settings.logger_level {
        compiled = compiled.set_logger_level(
            level
                .parse()
                .map_err(|_| ConfigError::InvalidLoggerLevel(level.clone()))?,
        );
    }

    if let Some(debug) = settings.debug {
        compiled = compiled.set_debug(debug.enabled());
    }

    if let Some(version) = settings.version {
        compiled = compiled.set_version(version);
    }

    if let Some(target) = settings.logger_target {
        compiled = compiled.set_logger_target(target);
    }

    if let Some(timeout) = settings.timeout {
        compiled = compiled.set_timeout(*timeout);
    }

    if let Some(count) = settings.max_redirects {
        compiled = compiled.set_max_redirects(count);
    }

    if let Some(track) = settings.track_redirects {
        compiled = compiled.set_track_redirects(track);
    }

    Ok(compiled)
}

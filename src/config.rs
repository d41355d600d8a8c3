mod error;
mod serde;
mod toml;

pub use self::{
    error::ConfigError,
    serde::{SerializableSettings, compile_settings},
    toml::read_settings,
};
use core::time::Duration;
use log::LevelFilter;

/// A default log target of HTTP request logs.
pub const DEFAULT_LOGGER_TARGET: &str = "webclient::http";
/// A default maximum number of redirects.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
/// A default timeout of a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// A default version in `User-Agent` headers.
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings of a web client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    logger_level: LevelFilter,
    debug: bool,
    version: String,
    logger_target: String,
    timeout: Duration,
    max_redirects: usize,
    track_redirects: bool,
}

impl Settings {
    /// Creates settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a logger level.
    ///
    /// Requests are logged only if it is the debug level.
    pub const fn logger_level(&self) -> LevelFilter {
        self.logger_level
    }

    /// Returns whether request logs are verbose.
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns a version in `User-Agent` headers.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a log target of request logs.
    pub fn logger_target(&self) -> &str {
        &self.logger_target
    }

    /// Returns a timeout of a whole request.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a maximum number of redirects.
    pub const fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Returns whether redirect history is tracked.
    pub const fn track_redirects(&self) -> bool {
        self.track_redirects
    }

    /// Sets a logger level.
    pub const fn set_logger_level(mut self, level: LevelFilter) -> Self {
        self.logger_level = level;
        self
    }

    /// Sets whether request logs are verbose.
    pub const fn set_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets a version.
    pub fn set_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets a log target.
    pub fn set_logger_target(mut self, target: impl Into<String>) -> Self {
        self.logger_target = target.into();
        self
    }

    /// Sets a timeout.
    pub const fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a maximum number of redirects.
    pub const fn set_max_redirects(mut self, count: usize) -> Self {
        self.max_redirects = count;
        self
    }

    /// Sets whether redirect history is tracked.
    pub const fn set_track_redirects(mut self, track: bool) -> Self {
        self.track_redirects = track;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logger_level: LevelFilter::Error,
            debug: false,
            version: DEFAULT_VERSION.into(),
            logger_target: DEFAULT_LOGGER_TARGET.into(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            track_redirects: true,
        }
    }
}

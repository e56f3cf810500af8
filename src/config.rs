//! Runtime configuration for a pickup point.
//!
//! Configuration is read from TOML. Every section and key is optional; absent
//! values fall back to the defaults documented on each field.
//!
//! ```toml
//! [intake]
//! extraction_timeout_secs = 20
//!
//! [lifecycle]
//! aging_threshold_days = 5
//! enforce_terminal_states = false
//!
//! [location]
//! city = "Elliot Lake"
//! province = "ON"
//! postal_prefix = "P5A"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use chrono::TimeDelta;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickupPointConfig {
    /// Label intake settings.
    pub intake: IntakeConfig,
    /// Package lifecycle settings.
    pub lifecycle: LifecycleConfig,
    /// Location defaults for new customers and postal codes.
    pub location: LocationConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Label intake settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Seconds to wait for one label extraction before treating it as
    /// failed. Defaults to 30.
    pub extraction_timeout_secs: u64,
}

impl IntakeConfig {
    /// Returns the extraction timeout.
    #[must_use]
    pub const fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_secs: 30,
        }
    }
}

/// Largest accepted `lifecycle.aging_threshold_days`.
pub const MAX_AGING_THRESHOLD_DAYS: u32 = 365;

/// Package lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Days a package may wait for pickup before the aging sweep reports it.
    /// Defaults to 5.
    pub aging_threshold_days: u32,
    /// Reject status changes out of terminal states. Defaults to `false`,
    /// which lets staff correct any status by hand.
    pub enforce_terminal_states: bool,
}

impl LifecycleConfig {
    /// Returns the aging threshold as a duration.
    #[must_use]
    pub fn aging_threshold(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.aging_threshold_days))
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            aging_threshold_days: 5,
            enforce_terminal_states: false,
        }
    }
}

/// Location defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// City recorded on new customers.
    pub city: String,
    /// Province recorded on new customers.
    pub province: String,
    /// Forward sortation area prepended to three-character postal codes.
    pub postal_prefix: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: "Elliot Lake".to_owned(),
            province: "ON".to_owned(),
            postal_prefix: "P5A".to_owned(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        /// Path relative to the configuration directory.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The TOML document is malformed or has unknown keys.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl PickupPointConfig {
    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a file inside a capability directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_toml_str`].
    pub fn load(dir: &Dir, path: &Utf8Path) -> Result<Self, ConfigError> {
        let raw = dir.read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.intake.extraction_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "intake.extraction_timeout_secs must be at least 1".to_owned(),
            ));
        }
        if !(1..=MAX_AGING_THRESHOLD_DAYS).contains(&self.lifecycle.aging_threshold_days) {
            return Err(ConfigError::Invalid(format!(
                "lifecycle.aging_threshold_days must be between 1 and {MAX_AGING_THRESHOLD_DAYS}"
            )));
        }
        if self.location.city.trim().is_empty() || self.location.province.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "location.city and location.province must not be empty".to_owned(),
            ));
        }
        let prefix = self.location.postal_prefix.trim();
        if prefix.chars().count() != 3 || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid(format!(
                "location.postal_prefix must be three alphanumeric characters, got '{prefix}'"
            )));
        }
        Ok(())
    }
}

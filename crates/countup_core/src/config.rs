//! Runtime configuration for the count-up display.
//!
//! # Responsibility
//! - Hold the reference instant and the tunables of the render loop.
//! - Parse user-supplied reference instants with an explicit UTC offset.
//!
//! # Invariants
//! - `reference` is immutable once an `App` is built from the config.
//! - `tick_interval` is non-zero, `storage_key` is non-empty and `locale`
//!   (when set) parses after `validate()` succeeds.

use crate::view::number_format::NumberFormat;
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Instant the count-up is measured from unless overridden.
pub const DEFAULT_REFERENCE: &str = "2024-06-27T19:03:00+03:00";
/// Storage key holding the JSON array of celebrated months.
pub const DEFAULT_STORAGE_KEY: &str = "celebratedMilestones";
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum ConfigError {
    InvalidReference {
        input: String,
        source: chrono::ParseError,
    },
    InvalidLocale {
        input: String,
        details: String,
    },
    ZeroTickInterval,
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference { input, source } => write!(
                f,
                "reference instant `{input}` is not ISO-8601 with an explicit UTC offset: {source}"
            ),
            Self::InvalidLocale { input, details } => {
                write!(f, "locale `{input}` is not usable for number formatting: {details}")
            }
            Self::ZeroTickInterval => write!(f, "tick interval must be greater than zero"),
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidReference { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Settings shared by the core dispatcher and its hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountupConfig {
    /// Fixed starting point; its offset also defines calendar boundaries.
    pub reference: DateTime<FixedOffset>,
    /// Cadence of periodic ticks.
    pub tick_interval: Duration,
    /// Key of the persisted milestone entry.
    pub storage_key: String,
    /// BCP-47 tag for digit grouping in modes 2 and 3; host locale when unset.
    pub locale: Option<String>,
}

impl Default for CountupConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            locale: None,
        }
    }
}

impl CountupConfig {
    /// Checks the tunables that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if let Some(tag) = &self.locale {
            NumberFormat::for_locale(tag)?;
        }
        Ok(())
    }
}

/// Parses an RFC 3339 date-time such as `2024-06-27T19:03:00+03:00`.
///
/// Inputs without an offset (`2024-06-27T19:03:00`) are rejected rather than
/// guessed, since the offset decides where calendar days begin.
pub fn parse_reference(input: &str) -> Result<DateTime<FixedOffset>, ConfigError> {
    let trimmed = input.trim();
    DateTime::parse_from_rfc3339(trimmed).map_err(|source| ConfigError::InvalidReference {
        input: trimmed.to_string(),
        source,
    })
}

fn default_reference() -> DateTime<FixedOffset> {
    *DEFAULT_REFERENCE_INSTANT
}

static DEFAULT_REFERENCE_INSTANT: Lazy<DateTime<FixedOffset>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339(DEFAULT_REFERENCE).expect("valid default reference instant")
});

//! Locale-aware digit grouping for the totals view modes.
//!
//! # Responsibility
//! - Resolve a BCP-47 locale from an explicit tag or the host environment.
//! - Render integers with that locale's group separators.
//!
//! # Invariants
//! - Resolution never fails for the host locale: anything unusable falls
//!   back to `en-US`.
//! - An explicit tag that does not parse is an error, not a silent fallback.

use crate::config::ConfigError;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_decimal::DecimalFormatter;
use icu_locale_core::{locale, Locale};
use log::debug;
use std::fmt::{Debug, Formatter};

/// Integer formatter bound to one locale.
pub struct NumberFormat {
    locale: Locale,
    formatter: DecimalFormatter,
}

impl NumberFormat {
    /// Formatter for an explicit tag such as `de-DE` or `de_DE.UTF-8`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidLocale` when the tag is not a valid locale or
    ///   no decimal data can be loaded for it.
    pub fn for_locale(tag: &str) -> Result<Self, ConfigError> {
        let invalid = |details: String| ConfigError::InvalidLocale {
            input: tag.to_string(),
            details,
        };
        let locale: Locale = normalize_tag(tag)
            .parse()
            .map_err(|err| invalid(format!("{err}")))?;
        Self::with_locale(locale).map_err(invalid)
    }

    /// Formatter for the host locale (`LC_ALL`/`LANG` and friends).
    pub fn system() -> Self {
        let detected = sys_locale::get_locale();
        let resolved = detected
            .as_deref()
            .filter(|tag| !is_posix_default(tag))
            .and_then(|tag| Self::for_locale(tag).ok());

        match resolved {
            Some(format) => format,
            None => {
                debug!(
                    "event=locale_fallback module=view status=ok detected={:?} locale=en-US",
                    detected
                );
                Self::en_us()
            }
        }
    }

    /// `tag` when given, else the host locale.
    pub fn resolve(tag: Option<&str>) -> Result<Self, ConfigError> {
        match tag {
            Some(tag) => Self::for_locale(tag),
            None => Ok(Self::system()),
        }
    }

    /// `1,234,567` style grouping.
    pub fn en_us() -> Self {
        Self::with_locale(locale!("en-US")).expect("compiled decimal data covers en-US")
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Renders `value` with the locale's grouping, e.g. `43.200` for `de`.
    pub fn group(&self, value: i64) -> String {
        self.formatter.format(&Decimal::from(value)).to_string()
    }

    fn with_locale(locale: Locale) -> Result<Self, String> {
        let formatter =
            DecimalFormatter::try_new(locale.clone().into(), DecimalFormatterOptions::default())
                .map_err(|err| format!("{err}"))?;
        Ok(Self { locale, formatter })
    }
}

impl Debug for NumberFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberFormat")
            .field("locale", &self.locale.to_string())
            .finish()
    }
}

/// POSIX environment names carry a codeset and `_` separators.
fn normalize_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    let base = trimmed
        .split(['.', '@'])
        .next()
        .unwrap_or(trimmed);
    base.replace('_', "-")
}

fn is_posix_default(tag: &str) -> bool {
    matches!(normalize_tag(tag).as_str(), "C" | "POSIX" | "")
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag, NumberFormat};
    use crate::config::ConfigError;

    #[test]
    fn separators_follow_the_pinned_locale() {
        let en = NumberFormat::for_locale("en-US").unwrap();
        let de = NumberFormat::for_locale("de-DE").unwrap();

        assert_eq!(en.group(43_200), "43,200");
        assert_eq!(de.group(43_200), "43.200");
        assert_eq!(en.group(1_234_567), "1,234,567");
        assert_eq!(de.group(1_234_567), "1.234.567");
        assert_eq!(en.group(999), "999");
        assert_eq!(de.group(-12_345), "-12.345");
    }

    #[test]
    fn posix_environment_names_are_accepted() {
        assert_eq!(normalize_tag("de_DE.UTF-8"), "de-DE");
        assert_eq!(normalize_tag("sr_RS@latin"), "sr-RS");

        let de = NumberFormat::for_locale("de_DE.UTF-8").unwrap();
        assert_eq!(de.locale().to_string(), "de-DE");
    }

    #[test]
    fn malformed_explicit_tag_is_rejected() {
        let err = NumberFormat::for_locale("not a locale!").unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidLocale { input, .. } if input == "not a locale!")
        );
    }

    #[test]
    fn host_locale_always_resolves() {
        let format = NumberFormat::system();
        assert!(!format.group(1_000).is_empty());
    }
}

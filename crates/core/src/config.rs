//! View configuration.
//!
//! Resolved once at startup and passed into the core. The core itself never reads environment
//! variables; the `*_from_env_value` helpers turn raw values (as read by the binary) into typed
//! settings so that parsing rules live in one place.

use crate::constants::DEFAULT_DEBOUNCE_MS;
use crate::error::{ViewError, ViewResult};
use crate::i18n::Locale;
use crate::mode::DisplayMode;
use std::time::Duration;

/// Environment variable holding the display mode debounce, in milliseconds.
pub const DEBOUNCE_ENV: &str = "PDV_DEBOUNCE_MS";
/// Environment variable holding the default locale tag.
pub const LOCALE_ENV: &str = "PDV_LOCALE";
/// Environment variable holding the default display mode.
pub const DISPLAY_MODE_ENV: &str = "PDV_DISPLAY_MODE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    debounce: Duration,
    default_locale: Locale,
    default_display_mode: DisplayMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            default_locale: Locale::default(),
            default_display_mode: DisplayMode::default(),
        }
    }
}

impl ViewConfig {
    pub fn new(debounce: Duration, default_locale: Locale, default_display_mode: DisplayMode) -> ViewResult<Self> {
        if default_locale.as_str().is_empty() {
            return Err(ViewError::InvalidInput("default locale cannot be empty".into()));
        }

        Ok(Self {
            debounce,
            default_locale,
            default_display_mode,
        })
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn default_display_mode(&self) -> DisplayMode {
        self.default_display_mode
    }
}

/// Parses a debounce override. Unset or blank falls back to the default.
pub fn debounce_from_env_value(value: Option<String>) -> ViewResult<Duration> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(Duration::from_millis(DEFAULT_DEBOUNCE_MS)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(ViewError::InvalidDebounce),
    }
}

/// Parses a locale override. Unset or blank falls back to the default.
pub fn locale_from_env_value(value: Option<String>) -> Locale {
    value
        .filter(|v| !v.trim().is_empty())
        .map(Locale::new)
        .unwrap_or_default()
}

/// Parses a display mode override. Unset or blank falls back to internal.
pub fn display_mode_from_env_value(value: Option<String>) -> ViewResult<DisplayMode> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(DisplayMode::default()),
        Some(raw) => raw.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_from_env_value() {
        assert_eq!(
            debounce_from_env_value(None).unwrap(),
            Duration::from_millis(DEFAULT_DEBOUNCE_MS)
        );
        assert_eq!(
            debounce_from_env_value(Some(" ".into())).unwrap(),
            Duration::from_millis(DEFAULT_DEBOUNCE_MS)
        );
        assert_eq!(
            debounce_from_env_value(Some("250".into())).unwrap(),
            Duration::from_millis(250)
        );
        assert!(matches!(
            debounce_from_env_value(Some("soon".into())),
            Err(ViewError::InvalidDebounce(_))
        ));
    }

    #[test]
    fn test_locale_from_env_value() {
        assert_eq!(locale_from_env_value(None), Locale::default());
        assert_eq!(locale_from_env_value(Some("".into())), Locale::default());
        assert_eq!(locale_from_env_value(Some("de_DE".into())).as_str(), "de-DE");
    }

    #[test]
    fn test_display_mode_from_env_value() {
        assert_eq!(display_mode_from_env_value(None).unwrap(), DisplayMode::Internal);
        assert_eq!(
            display_mode_from_env_value(Some("external".into())).unwrap(),
            DisplayMode::External
        );
        assert!(display_mode_from_env_value(Some("public".into())).is_err());
    }

    #[test]
    fn test_new_rejects_empty_locale() {
        let err = ViewConfig::new(Duration::ZERO, Locale::new("  "), DisplayMode::External).unwrap_err();
        assert!(matches!(err, ViewError::InvalidInput(_)));

        let config = ViewConfig::new(Duration::ZERO, Locale::new("fr"), DisplayMode::External).unwrap();
        assert_eq!(config.default_locale().as_str(), "fr");
        assert_eq!(config.default_display_mode(), DisplayMode::External);
    }
}

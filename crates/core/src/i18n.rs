//! Locale and translation lookup passed explicitly into the view core.
//!
//! The core never reads an ambient locale. Callers hand it a [`Translator`] for the active
//! locale; [`Catalog`] is the in-memory implementation used by the CLI and tests. Storage of
//! translation strings is the caller's business.

use crate::error::{ViewError, ViewResult};
use serde_json::Value;
use std::collections::HashMap;

/// A BCP 47-style locale tag such as `en-US` or `de`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale, accepting `_` as a separator (`en_GB` becomes `en-GB`).
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().replace('_', "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased primary language subtag (`en` for `en-GB`).
    pub fn language(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Uppercased region subtag, if any (`GB` for `en-GB`).
    pub fn region(&self) -> Option<String> {
        self.0
            .split('-')
            .nth(1)
            .filter(|r| !r.is_empty())
            .map(str::to_ascii_uppercase)
    }

    /// `chrono` format string for this locale's short date.
    pub fn short_date_format(&self) -> &'static str {
        match (self.language().as_str(), self.region().as_deref()) {
            ("en", None | Some("US")) => "%m/%d/%Y",
            ("en", Some(_)) => "%d/%m/%Y",
            ("de" | "pl" | "ru" | "cs", _) => "%d.%m.%Y",
            ("fr" | "es" | "it" | "pt", _) => "%d/%m/%Y",
            ("nl", _) => "%d-%m-%Y",
            ("ja" | "zh", _) => "%Y/%m/%d",
            _ => "%Y-%m-%d",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_LOCALE)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translation lookup for a single active locale.
pub trait Translator {
    /// The locale this translator renders.
    fn locale(&self) -> &Locale;

    /// Looks up `key`, returning `None` when the catalog has no entry.
    fn translate(&self, key: &str) -> Option<String>;

    /// Looks up `key`, falling back to the key itself.
    fn text(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_string())
    }
}

/// Translator with no entries; every label renders as its key.
#[derive(Clone, Debug, Default)]
pub struct NoTranslation {
    locale: Locale,
}

impl NoTranslation {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Translator for NoTranslation {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory translation table for one locale.
///
/// Nested mappings are flattened into dotted keys, so
/// `{ navigation: { skuData: "SKU Data" } }` provides `navigation.skuData`.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces one entry.
    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    /// Builds a catalog from a decoded JSON/YAML mapping.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::CatalogNotMapping` if `value` is not an object. Non-string leaves
    /// are ignored.
    pub fn from_value(locale: Locale, value: &Value) -> ViewResult<Self> {
        let Value::Object(map) = value else {
            return Err(ViewError::CatalogNotMapping);
        };

        let mut catalog = Self::new(locale);
        for (key, child) in map {
            catalog.flatten_into(key, child);
        }
        Ok(catalog)
    }

    /// Parses a YAML (or JSON, which is valid YAML) catalog.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::CatalogParse` for unparseable text and
    /// `ViewError::CatalogNotMapping` if the document is not a mapping.
    pub fn from_yaml(locale: Locale, text: &str) -> ViewResult<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(ViewError::CatalogParse)?;
        Self::from_value(locale, &value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flatten_into(&mut self, prefix: &str, value: &Value) {
        match value {
            Value::String(text) => {
                self.entries.insert(prefix.to_string(), text.clone());
            }
            Value::Object(map) => {
                for (key, child) in map {
                    self.flatten_into(&format!("{prefix}.{key}"), child);
                }
            }
            _ => {}
        }
    }
}

impl Translator for Catalog {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

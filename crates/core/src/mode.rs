//! Display mode: who the product detail view is being rendered for.

use crate::constants::DISPLAY_MODE_QUERY_KEY;
use crate::error::{ViewError, ViewResult};
use serde::Serialize;
use std::str::FromStr;

/// `Internal` shows every authored section; `External` (partner-facing) hides sections and
/// sub-items that have no resolved data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Internal,
    External,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Internal => "internal",
            DisplayMode::External => "external",
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, DisplayMode::External)
    }

    /// Renders the mode as a query-string pair, e.g. `mode=external`.
    pub fn to_query(&self) -> String {
        format!("{DISPLAY_MODE_QUERY_KEY}={}", self.as_str())
    }

    /// Reads the mode from a query string such as `?tab=2&mode=external`.
    ///
    /// Returns `None` when the key is absent or its value is not a display mode.
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == DISPLAY_MODE_QUERY_KEY)
            .find_map(|(_, value)| value.parse().ok())
    }
}

impl FromStr for DisplayMode {
    type Err = ViewError;

    fn from_str(s: &str) -> ViewResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(DisplayMode::Internal),
            "external" | "partner" => Ok(DisplayMode::External),
            other => Err(ViewError::InvalidDisplayMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

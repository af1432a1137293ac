//! Named value transformers applied to raw payload values before display.

use crate::constants::ARRAY_JOIN_SEPARATOR;
use crate::i18n::Locale;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// A value transformer selected per field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transformer {
    /// Joins array elements with `", "`.
    ArrayToString,
    /// Renders `true`/`false` as `Yes`/`No`; other values pass through.
    BooleanToString,
    /// Renders a parseable date as a locale short date; unparseable values pass through.
    FormatDate,
}

impl Transformer {
    /// Returns the transformer identifier as used in field tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transformer::ArrayToString => "arrayToString",
            Transformer::BooleanToString => "booleanToString",
            Transformer::FormatDate => "formatDate",
        }
    }

    /// Looks up a transformer by identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arrayToString" => Some(Transformer::ArrayToString),
            "booleanToString" => Some(Transformer::BooleanToString),
            "formatDate" => Some(Transformer::FormatDate),
            _ => None,
        }
    }

    /// Applies this transformer to a raw value. Never fails.
    pub fn apply(&self, raw: &Value, locale: &Locale) -> Value {
        match self {
            Transformer::ArrayToString => match raw {
                Value::Array(items) => Value::String(
                    items
                        .iter()
                        .filter_map(scalar_text)
                        .collect::<Vec<_>>()
                        .join(ARRAY_JOIN_SEPARATOR),
                ),
                other => other.clone(),
            },
            Transformer::BooleanToString => match raw {
                Value::Bool(true) => Value::String("Yes".into()),
                Value::Bool(false) => Value::String("No".into()),
                other => other.clone(),
            },
            Transformer::FormatDate => match parse_date(raw) {
                Some(date) => Value::String(date.format(locale.short_date_format()).to_string()),
                None => raw.clone(),
            },
        }
    }
}

/// Text form of a scalar; `None` for `null`, arrays and objects.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl std::fmt::Display for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the date forms the data API emits: RFC 3339 timestamps, plain ISO dates, ISO
/// date-times without offset and epoch milliseconds.
fn parse_date(raw: &Value) -> Option<NaiveDate> {
    match raw {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.date_naive())
                .ok()
                .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|dt| dt.date())
                })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

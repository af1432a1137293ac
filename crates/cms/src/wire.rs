//! Per-attribute readers for loosely typed CMS attributes.
//!
//! Authors edit blocks by hand, so a single attribute of the wrong type must not take the whole
//! block (or descriptor) with it. Each reader accepts the expected JSON type, treats `null` and
//! absence as unset, and logs anything else before falling back to unset.

use serde_json::Value;

/// Reads a string attribute.
pub(crate) fn text(value: &Value, attr: &str, owner: &str) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => {
            tracing::warn!("{owner}: attribute {attr} is not a string ({other}); ignoring it");
            None
        }
    }
}

/// Reads a boolean attribute.
pub(crate) fn flag(value: &Value, attr: &str, owner: &str) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Null => None,
        other => {
            tracing::warn!("{owner}: attribute {attr} is not a boolean ({other}); ignoring it");
            None
        }
    }
}

/// Reads an identifier authored as a string or an integer.
pub(crate) fn identifier(value: &Value, attr: &str, owner: &str) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Some(number.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!("{owner}: attribute {attr} is not a string or integer ({other}); ignoring it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_accepts_only_strings() {
        assert_eq!(text(&json!("Info"), "title", "block 0"), Some("Info".into()));
        assert_eq!(text(&json!(42), "title", "block 0"), None);
        assert_eq!(text(&Value::Null, "title", "block 0"), None);
    }

    #[test]
    fn test_flag_accepts_only_booleans() {
        assert_eq!(flag(&json!(false), "show", "block 0"), Some(false));
        assert_eq!(flag(&json!("true"), "show", "block 0"), None);
    }

    #[test]
    fn test_identifier_accepts_strings_and_integers() {
        assert_eq!(identifier(&json!("a"), "id", "block 0"), Some("a".into()));
        assert_eq!(identifier(&json!(7), "id", "block 0"), Some("7".into()));
        assert_eq!(identifier(&json!(1.5), "id", "block 0"), None);
        assert_eq!(identifier(&json!([1]), "id", "block 0"), None);
    }
}

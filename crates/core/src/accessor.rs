//! Path-value access into the data-API payload.
//!
//! The data API groups product values by topic (`basicData`, `sapData`, ...) and any branch may
//! legitimately be missing. Every read of the payload goes through [`FieldPath::resolve`] (or
//! the [`get`] shorthand), which treats a missing branch as "no value" instead of an error.
//!
//! Paths are dotted strings compiled once into segments. A segment addresses an object key,
//! or an array element when the current value is an array and the segment is a decimal index:
//!
//! ```text
//! referenceRelationship.bundles.0.sku
//! ```

use serde_json::Value;

/// One compiled path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Segment {
    key: String,
    index: Option<usize>,
}

/// A dotted payload path, parsed once and resolved many times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Compiles a dotted path. Never fails; a path that matches nothing simply resolves to `None`.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(|key| Segment {
                key: key.to_string(),
                index: array_index(key),
            })
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Returns the path as authored.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walks `value` along this path.
    ///
    /// Returns `None` as soon as a segment is missing, or the walk reaches `null` or a scalar
    /// before the last segment. A `null` stored at the final segment is returned as-is.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(&segment.key)?,
                Value::Array(items) => items.get(segment.index?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses a canonical decimal index: ASCII digits only, no sign, no leading zero except `0`.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

/// Resolve a dotted `path` against `value` without keeping the compiled path.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    FieldPath::parse(path).resolve(value)
}

/// Returns true if a resolved value carries displayable content.
///
/// `null`, blank strings, empty arrays and empty objects count as absent.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_canonical_indices_address_arrays() {
        let data = json!({ "items": ["a", "b"] });
        assert_eq!(get(&data, "items.0"), Some(&json!("a")));
        assert_eq!(get(&data, "items.1"), Some(&json!("b")));
        assert_eq!(get(&data, "items.+1"), None);
        assert_eq!(get(&data, "items.01"), None);
        assert_eq!(get(&data, "items.00"), None);
        assert_eq!(get(&data, "items.-0"), None);
        assert_eq!(get(&data, "items."), None);
    }

    fn payload() -> Value {
        json!({
            "basicData": { "sellable": true, "name": "Kettle", "nothing": null },
            "referenceRelationship": {
                "bundles": [{ "sku": "B-1" }, { "sku": "B-2" }]
            },
            "seoData": "flat"
        })
    }

    #[test]
    fn test_get_returns_nested_value() {
        let data = payload();
        assert_eq!(get(&data, "basicData.name"), Some(&json!("Kettle")));
        assert_eq!(get(&data, "basicData.sellable"), Some(&json!(true)));
    }

    #[test]
    fn test_get_indexes_arrays() {
        let data = payload();
        assert_eq!(
            get(&data, "referenceRelationship.bundles.1.sku"),
            Some(&json!("B-2"))
        );
        assert_eq!(get(&data, "referenceRelationship.bundles.9.sku"), None);
        assert_eq!(get(&data, "referenceRelationship.bundles.first"), None);
    }

    #[test]
    fn test_get_missing_branch_is_none() {
        let data = payload();
        assert_eq!(get(&data, "sapData.ean"), None);
        assert_eq!(get(&data, "basicData.nothing.deeper"), None);
        assert_eq!(get(&data, "seoData.title"), None);
        assert_eq!(get(&data, "basicData.name.length"), None);
    }

    #[test]
    fn test_get_final_null_is_returned() {
        let data = payload();
        assert_eq!(get(&data, "basicData.nothing"), Some(&Value::Null));
    }

    #[test]
    fn test_get_never_panics_on_odd_inputs() {
        let inputs = [
            Value::Null,
            json!(1),
            json!("text"),
            json!([]),
            json!([[1, 2], { "": 3 }]),
            payload(),
        ];
        let paths = ["", ".", "..", "0", "0.0", "a..b", "basicData.", ".basicData", "1.1"];

        for value in &inputs {
            for path in paths {
                let _ = get(value, path);
            }
        }

        assert_eq!(get(&json!({ "": 3 }), ""), Some(&json!(3)));
        assert_eq!(get(&json!([[1, 2]]), "0.1"), Some(&json!(2)));
    }

    #[test]
    fn test_get_does_not_mutate_input() {
        let data = payload();
        let before = data.clone();
        let _ = get(&data, "basicData.missing.value");
        assert_eq!(data, before);
    }

    #[test]
    fn test_compiled_path_is_reusable() {
        let path = FieldPath::parse("basicData.name");
        let a = json!({ "basicData": { "name": "A" } });
        let b = json!({ "basicData": { "name": "B" } });
        assert_eq!(path.resolve(&a), Some(&json!("A")));
        assert_eq!(path.resolve(&b), Some(&json!("B")));
        assert_eq!(path.to_string(), "basicData.name");
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&Value::Null)));
        assert!(!is_present(Some(&json!("  "))));
        assert!(!is_present(Some(&json!([]))));
        assert!(!is_present(Some(&json!({}))));
        assert!(is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!(0))));
        assert!(is_present(Some(&json!(["a"]))));
    }
}

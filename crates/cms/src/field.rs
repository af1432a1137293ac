//! Field descriptor wire models and translation helpers.
//!
//! A field descriptor is the CMS declaration of one display cell: which field it shows, the
//! label to print next to it and, optionally, exactly where the value lives in the data-API
//! payload.

use crate::wire;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Data-API topic a field descriptor belongs to.
///
/// Each context names the payload topic that conventional field paths are built from.
/// Contexts unknown to this crate are preserved verbatim in [`Context::Custom`] and used as
/// their own topic key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Context {
    #[default]
    Basic,
    Sap,
    Marketing,
    Seo,
    ProductCard,
    Compliance,
    References,
    AfterService,
    Packaging,
    Specifications,
    Collaterals,
    Custom(String),
}

impl Context {
    /// Returns the CMS spelling of this context.
    pub fn as_str(&self) -> &str {
        match self {
            Context::Basic => "basic",
            Context::Sap => "sap",
            Context::Marketing => "marketing",
            Context::Seo => "seo",
            Context::ProductCard => "productCard",
            Context::Compliance => "compliance",
            Context::References => "references",
            Context::AfterService => "afterService",
            Context::Packaging => "packaging",
            Context::Specifications => "specifications",
            Context::Collaterals => "collaterals",
            Context::Custom(raw) => raw,
        }
    }

    /// Returns the data-API payload topic key for this context.
    pub fn topic(&self) -> &str {
        match self {
            Context::Basic => "basicData",
            Context::Sap => "sapData",
            Context::Marketing => "marketingData",
            Context::Seo => "seoData",
            Context::ProductCard => "productCardData",
            Context::Compliance => "complianceCertifications",
            Context::References => "referenceRelationship",
            Context::AfterService => "afterService",
            Context::Packaging => "packagingData",
            Context::Specifications => "specificationData",
            Context::Collaterals => "marketingCollaterals",
            Context::Custom(raw) => raw,
        }
    }

    /// Parses a CMS context tag. Never fails; unknown tags become [`Context::Custom`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "basic" => Context::Basic,
            "sap" => Context::Sap,
            "marketing" => Context::Marketing,
            "seo" => Context::Seo,
            "productCard" => Context::ProductCard,
            "compliance" => Context::Compliance,
            "references" => Context::References,
            "afterService" => Context::AfterService,
            "packaging" => Context::Packaging,
            "specifications" => Context::Specifications,
            "collaterals" => Context::Collaterals,
            other => Context::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Context {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Context::parse(&raw))
    }
}

/// Domain-level field descriptor.
///
/// `field_name` stays optional so that descriptors authored without one survive translation;
/// the resolver skips them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field_name: Option<String>,
    pub label: String,
    pub explicit_path: Option<String>,
    pub context: Context,
    pub default_value: Option<String>,
    /// Transformer named by the author (`arrayToString`, `booleanToString`, `formatDate`).
    pub transformer: Option<String>,
}

impl FieldDescriptor {
    /// Convenience constructor for a descriptor resolved by convention.
    pub fn new(field_name: impl Into<String>, label: impl Into<String>, context: Context) -> Self {
        Self {
            field_name: Some(field_name.into()),
            label: label.into(),
            explicit_path: None,
            context,
            default_value: None,
            transformer: None,
        }
    }

    /// Sets an explicit data path that overrides every convention.
    pub fn with_explicit_path(mut self, path: impl Into<String>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Names the transformer applied to the resolved value.
    pub fn with_transformer(mut self, transformer: impl Into<String>) -> Self {
        self.transformer = Some(transformer.into());
        self
    }

    /// Sets the display value used when nothing resolves.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

// ============================================================================
// Translation helpers
// ============================================================================

/// Translate a wire `fields` value into descriptors.
///
/// A value that is not an array yields no descriptors. Array entries that are not objects are
/// skipped with a warning; a mistyped attribute falls back to unset without dropping its
/// descriptor. Descriptors keep their authoring order.
pub fn fields_from_value(value: &Value) -> Vec<FieldDescriptor> {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            tracing::warn!("field descriptor list is not an array; ignoring it");
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(
            |(index, item)| match serde_path_to_error::deserialize::<_, FieldWire>(item) {
                Ok(field) => Some(wire_to_domain(index, field)),
                Err(err) => {
                    let path = err.path().to_string();
                    tracing::warn!(
                        "skipping field descriptor {index}: schema mismatch at {}: {}",
                        if path.is_empty() { "<root>" } else { path.as_str() },
                        err.into_inner()
                    );
                    None
                }
            },
        )
        .collect()
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldWire {
    #[serde(default)]
    field_name: Value,
    #[serde(default)]
    label: Value,
    #[serde(default, alias = "path")]
    explicit_path: Value,
    #[serde(default)]
    context: Value,
    #[serde(default, alias = "default")]
    default_value: Value,
    #[serde(default)]
    transformer: Value,
}

fn wire_to_domain(index: usize, field: FieldWire) -> FieldDescriptor {
    let owner = format!("field descriptor {index}");
    let field_name = wire::text(&field.field_name, "fieldName", &owner)
        .filter(|name| !name.trim().is_empty());
    let label = wire::text(&field.label, "label", &owner)
        .or_else(|| field_name.clone())
        .unwrap_or_default();

    FieldDescriptor {
        field_name,
        label,
        explicit_path: wire::text(&field.explicit_path, "explicitPath", &owner)
            .filter(|p| !p.trim().is_empty()),
        context: wire::text(&field.context, "context", &owner)
            .map(|raw| Context::parse(&raw))
            .unwrap_or_default(),
        default_value: wire::text(&field.default_value, "defaultValue", &owner),
        transformer: wire::text(&field.transformer, "transformer", &owner)
            .filter(|name| !name.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_topic_mapping() {
        assert_eq!(Context::Basic.topic(), "basicData");
        assert_eq!(Context::Sap.topic(), "sapData");
        assert_eq!(Context::Compliance.topic(), "complianceCertifications");
        assert_eq!(Context::parse("warehouseData").topic(), "warehouseData");
    }

    #[test]
    fn test_context_parse_round_trips_known_tags() {
        for tag in ["basic", "sap", "marketing", "seo", "productCard", "compliance"] {
            assert_eq!(Context::parse(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_fields_from_value_keeps_order_and_aliases() {
        let value = json!([
            { "fieldName": "sellable", "label": "Sellable", "context": "basic" },
            { "fieldName": "ean", "label": "EAN", "path": "sapData.codes.ean", "context": "sap" },
            { "fieldName": "brand", "default": "n/a" }
        ]);

        let fields = fields_from_value(&value);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].field_name.as_deref(), Some("sellable"));
        assert_eq!(fields[1].explicit_path.as_deref(), Some("sapData.codes.ean"));
        assert_eq!(fields[1].context, Context::Sap);
        assert_eq!(fields[2].label, "brand");
        assert_eq!(fields[2].default_value.as_deref(), Some("n/a"));
        assert_eq!(fields[2].context, Context::Basic);
        assert!(fields[0].transformer.is_none());
    }

    #[test]
    fn test_transformer_name_is_read() {
        let fields = fields_from_value(&json!([
            { "fieldName": "warrantyEnd", "transformer": "formatDate" },
            { "fieldName": "tags", "transformer": 1 }
        ]));
        assert_eq!(fields[0].transformer.as_deref(), Some("formatDate"));
        assert!(fields[1].transformer.is_none());
    }

    #[test]
    fn test_fields_from_value_skips_non_object_entries() {
        let value = json!([
            "not a field",
            { "fieldName": "colour", "label": "Colour" },
            7
        ]);

        let fields = fields_from_value(&value);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_name.as_deref(), Some("colour"));
    }

    #[test]
    fn test_mistyped_attributes_keep_the_descriptor() {
        let value = json!([
            { "fieldName": "weight", "label": 3 },
            { "fieldName": 42, "label": "Orphan" },
            { "fieldName": "ean", "context": ["sap"], "path": false, "default": 0 }
        ]);

        let fields = fields_from_value(&value);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].label, "weight");
        assert!(fields[1].field_name.is_none());
        assert_eq!(fields[1].label, "Orphan");
        assert_eq!(fields[2].context, Context::Basic);
        assert!(fields[2].explicit_path.is_none());
        assert!(fields[2].default_value.is_none());
    }

    #[test]
    fn test_fields_from_value_non_array_is_empty() {
        assert!(fields_from_value(&json!({ "fieldName": "x" })).is_empty());
        assert!(fields_from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_blank_field_name_becomes_none() {
        let fields = fields_from_value(&json!([{ "fieldName": "  ", "label": "Ghost" }]));
        assert_eq!(fields.len(), 1);
        assert!(fields[0].field_name.is_none());
    }
}

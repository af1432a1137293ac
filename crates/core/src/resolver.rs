//! Field-path resolution: from CMS field descriptors to display-ready label/value pairs.
//!
//! For every descriptor the resolver picks a payload path and, optionally, a transformer:
//!
//! 1. an explicit path authored on the descriptor always wins;
//! 2. otherwise a historically irregular field name uses its entry in [`PATH_OVERRIDES`];
//! 3. otherwise the conventional path `<context topic>.<fieldName>` is used.
//!
//! A transformer named on the descriptor wins; otherwise one is chosen by field name from
//! [`FIELD_TRANSFORMERS`]. Transformers only run when the path resolved to something. Nothing
//! here fails: an unresolvable field displays its default, or [`MISSING_VALUE`].

use crate::accessor::FieldPath;
use crate::constants::{ARRAY_JOIN_SEPARATOR, HTML_FIELD_NAME, MISSING_VALUE};
use crate::i18n::Locale;
use crate::transform::{scalar_text, Transformer};
use cms::{Context, FieldDescriptor};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Field names whose payload location does not follow the `<topic>.<fieldName>` convention.
pub const PATH_OVERRIDES: &[(&str, &str)] = &[
    ("productName", "basicData.name"),
    ("ean", "sapData.eanCode"),
    ("materialNumber", "sapData.material.number"),
    ("metaTitle", "seoData.meta.title"),
    ("metaDescription", "seoData.meta.description"),
    ("launchDate", "marketingData.launch.date"),
];

/// Field names rendered through a transformer.
pub const FIELD_TRANSFORMERS: &[(&str, Transformer)] = &[
    ("sellable", Transformer::BooleanToString),
    ("discontinued", Transformer::BooleanToString),
    ("isDangerousGoods", Transformer::BooleanToString),
    ("keywords", Transformer::ArrayToString),
    ("colors", Transformer::ArrayToString),
    ("targetMarkets", Transformer::ArrayToString),
    ("launchDate", Transformer::FormatDate),
    ("createdAt", Transformer::FormatDate),
    ("updatedAt", Transformer::FormatDate),
];

/// How a resolved value should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Status,
    Html,
}

impl FieldKind {
    /// Classifies a field by name.
    pub fn for_field(field_name: &str) -> Self {
        if field_name.to_lowercase().contains("status") {
            FieldKind::Status
        } else if field_name == HTML_FIELD_NAME {
            FieldKind::Html
        } else {
            FieldKind::Text
        }
    }
}

/// One display cell, ready for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
}

/// Resolves one field's value from the data payload.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGetter {
    path: FieldPath,
    transformer: Option<Transformer>,
}

impl FieldGetter {
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn transformer(&self) -> Option<Transformer> {
        self.transformer
    }

    /// Resolves the raw value and applies the transformer, if any.
    ///
    /// Returns `None` when the path does not resolve; the transformer is not run in that case.
    pub fn get(&self, data: &Value, locale: &Locale) -> Option<Value> {
        let raw = self.path.resolve(data)?;
        Some(match self.transformer {
            Some(transformer) => transformer.apply(raw, locale),
            None => raw.clone(),
        })
    }
}

/// Getters keyed by field name, bound to the locale they render dates in.
#[derive(Clone, Debug, Default)]
pub struct GetterMap {
    locale: Locale,
    getters: HashMap<String, FieldGetter>,
}

impl GetterMap {
    pub fn get(&self, field_name: &str) -> Option<&FieldGetter> {
        self.getters.get(field_name)
    }

    /// Resolves `field_name` against `data`; `None` if the field is unknown or unresolved.
    pub fn resolve(&self, field_name: &str, data: &Value) -> Option<Value> {
        self.getters.get(field_name)?.get(data, &self.locale)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.getters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }
}

/// Builds the getter map for a set of field descriptors.
///
/// # Arguments
///
/// * `fields` - Descriptors in authoring order; entries without a field name are skipped.
/// * `context` - Context whose payload topic prefixes conventional paths.
/// * `locale` - Locale used by the `formatDate` transformer.
///
/// # Returns
///
/// A [`GetterMap`] with one getter per distinct field name. When a field name repeats, the
/// last descriptor wins.
pub fn build_getter_map(fields: &[FieldDescriptor], context: &Context, locale: &Locale) -> GetterMap {
    let mut getters = HashMap::with_capacity(fields.len());

    for field in fields {
        let Some(field_name) = field.field_name.as_deref() else {
            continue;
        };

        let path = match field.explicit_path.as_deref() {
            Some(explicit) => explicit.to_string(),
            None => path_override(field_name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}.{}", context.topic(), field_name)),
        };

        let transformer = authored_transformer(field, field_name).or_else(|| transformer_for(field_name));
        if let Some(transformer) = transformer {
            tracing::trace!("field {field_name} reads {path} through {transformer}");
        }

        getters.insert(
            field_name.to_string(),
            FieldGetter {
                path: FieldPath::parse(&path),
                transformer,
            },
        );
    }

    GetterMap {
        locale: locale.clone(),
        getters,
    }
}

/// Produces display cells for `fields`, in the same order.
///
/// The value falls back to the descriptor default, then to [`MISSING_VALUE`].
pub fn build_items_from_fields(
    fields: &[FieldDescriptor],
    getters: &GetterMap,
    data: &Value,
) -> Vec<ResolvedField> {
    fields
        .iter()
        .map(|field| {
            let field_name = field.field_name.as_deref().unwrap_or_default();
            let value = getters
                .resolve(field_name, data)
                .as_ref()
                .and_then(display_text)
                .or_else(|| field.default_value.clone())
                .unwrap_or_else(|| MISSING_VALUE.to_string());

            ResolvedField {
                label: field.label.clone(),
                value,
                kind: FieldKind::for_field(field_name),
            }
        })
        .collect()
}

/// Resolves descriptors that may belong to different contexts.
///
/// Each descriptor is resolved with the getter map of its own context; output order matches
/// `fields`.
pub fn resolve_fields(fields: &[FieldDescriptor], data: &Value, locale: &Locale) -> Vec<ResolvedField> {
    let maps = getter_maps_by_context(fields, locale);
    let empty = GetterMap::default();

    fields
        .iter()
        .flat_map(|field| {
            let getters = maps.get(&field.context).unwrap_or(&empty);
            build_items_from_fields(std::slice::from_ref(field), getters, data)
        })
        .collect()
}

/// Returns true if at least one descriptor resolves to a displayable value.
///
/// Defaults do not count: a field showing its default has no data behind it.
pub fn has_resolved_value(fields: &[FieldDescriptor], data: &Value, locale: &Locale) -> bool {
    let maps = getter_maps_by_context(fields, locale);

    fields.iter().any(|field| {
        let (Some(field_name), Some(getters)) =
            (field.field_name.as_deref(), maps.get(&field.context))
        else {
            return false;
        };
        getters
            .resolve(field_name, data)
            .as_ref()
            .and_then(display_text)
            .is_some()
    })
}

fn getter_maps_by_context(
    fields: &[FieldDescriptor],
    locale: &Locale,
) -> HashMap<Context, GetterMap> {
    let mut groups: HashMap<Context, Vec<FieldDescriptor>> = HashMap::new();
    for field in fields {
        groups
            .entry(field.context.clone())
            .or_default()
            .push(field.clone());
    }

    groups
        .into_iter()
        .map(|(context, group)| {
            let getters = build_getter_map(&group, &context, locale);
            (context, getters)
        })
        .collect()
}

/// Text shown for a resolved value, or `None` if it carries nothing displayable.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!parts.is_empty()).then(|| parts.join(ARRAY_JOIN_SEPARATOR))
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value.to_string()),
        scalar => scalar_text(scalar),
    }
}

fn path_override(field_name: &str) -> Option<&'static str> {
    PATH_OVERRIDES
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, path)| *path)
}

/// Transformer named on the descriptor. Unknown names are logged and ignored.
fn authored_transformer(field: &FieldDescriptor, field_name: &str) -> Option<Transformer> {
    let name = field.transformer.as_deref()?;
    let transformer = Transformer::from_name(name.trim());
    if transformer.is_none() {
        tracing::warn!("field {field_name} names unknown transformer {name:?}; using the field table");
    }
    transformer
}

fn transformer_for(field_name: &str) -> Option<Transformer> {
    FIELD_TRANSFORMERS
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, transformer)| *transformer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn locale() -> Locale {
        Locale::new("en-US")
    }

    #[test]
    fn test_sellable_resolves_to_yes() {
        let fields = vec![FieldDescriptor::new("sellable", "Sellable", Context::Basic)];
        let getters = build_getter_map(&fields, &Context::Basic, &locale());
        let data = json!({ "basicData": { "sellable": true } });

        assert_eq!(getters.resolve("sellable", &data), Some(json!("Yes")));
        let items = build_items_from_fields(&fields, &getters, &data);
        assert_eq!(items[0].value, "Yes");
        assert_eq!(items[0].kind, FieldKind::Text);
    }

    #[test]
    fn test_authored_transformer_beats_field_table() {
        let fields = vec![
            FieldDescriptor::new("warrantyEnd", "Warranty end", Context::Basic)
                .with_transformer("formatDate"),
            FieldDescriptor::new("sellable", "Sellable", Context::Basic)
                .with_transformer("arrayToString"),
            FieldDescriptor::new("discontinued", "Discontinued", Context::Basic)
                .with_transformer("shout"),
        ];
        let getters = build_getter_map(&fields, &Context::Basic, &locale());

        assert_eq!(
            getters.get("warrantyEnd").and_then(FieldGetter::transformer),
            Some(Transformer::FormatDate)
        );
        assert_eq!(
            getters.get("sellable").and_then(FieldGetter::transformer),
            Some(Transformer::ArrayToString)
        );
        assert_eq!(
            getters.get("discontinued").and_then(FieldGetter::transformer),
            Some(Transformer::BooleanToString)
        );

        let data = json!({ "basicData": { "warrantyEnd": "2027-03-01" } });
        assert_eq!(getters.resolve("warrantyEnd", &data), Some(json!("03/01/2027")));
    }

    #[test]
    fn test_explicit_path_beats_convention() {
        let fields = vec![FieldDescriptor::new("brand", "Brand", Context::Basic)
            .with_explicit_path("marketingData.brand.display")];
        let getters = build_getter_map(&fields, &Context::Basic, &locale());
        let data = json!({
            "basicData": { "brand": "conventional" },
            "marketingData": { "brand": { "display": "explicit" } }
        });

        assert_eq!(getters.resolve("brand", &data), Some(json!("explicit")));
    }

    #[test]
    fn test_override_table_beats_convention_but_not_explicit_path() {
        let data = json!({
            "basicData": { "name": "from override", "productName": "from convention" },
            "sapData": { "productName": "from explicit" }
        });

        let by_table = build_getter_map(
            &[FieldDescriptor::new("productName", "Name", Context::Basic)],
            &Context::Basic,
            &locale(),
        );
        assert_eq!(by_table.resolve("productName", &data), Some(json!("from override")));

        let by_explicit = build_getter_map(
            &[FieldDescriptor::new("productName", "Name", Context::Basic)
                .with_explicit_path("sapData.productName")],
            &Context::Basic,
            &locale(),
        );
        assert_eq!(
            by_explicit.resolve("productName", &data),
            Some(json!("from explicit"))
        );
    }

    #[test]
    fn test_conventional_path_uses_context_topic() {
        let fields = vec![FieldDescriptor::new("plant", "Plant", Context::Sap)];
        let getters = build_getter_map(&fields, &Context::Sap, &locale());
        assert_eq!(
            getters.get("plant").map(|g| g.path().as_str()),
            Some("sapData.plant")
        );
    }

    #[test]
    fn test_descriptor_without_field_name_is_skipped() {
        let mut ghost = FieldDescriptor::new("x", "Ghost", Context::Basic);
        ghost.field_name = None;
        let fields = vec![ghost, FieldDescriptor::new("colour", "Colour", Context::Basic)];

        let getters = build_getter_map(&fields, &Context::Basic, &locale());
        assert_eq!(getters.len(), 1);

        let items = build_items_from_fields(&fields, &getters, &json!({}));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Ghost");
        assert_eq!(items[0].value, MISSING_VALUE);
    }

    #[test]
    fn test_missing_values_fall_back_to_default_then_dash() {
        let fields = vec![
            FieldDescriptor::new("weight", "Weight", Context::Basic).with_default("n/a"),
            FieldDescriptor::new("height", "Height", Context::Basic),
            FieldDescriptor::new("depth", "Depth", Context::Basic),
        ];
        let getters = build_getter_map(&fields, &Context::Basic, &locale());
        let data = json!({ "basicData": { "depth": "   " } });

        let values: Vec<_> = build_items_from_fields(&fields, &getters, &data)
            .into_iter()
            .map(|item| item.value)
            .collect();
        assert_eq!(values, vec!["n/a", "-", "-"]);
    }

    #[test]
    fn test_transformer_not_applied_to_missing_value() {
        let fields = vec![FieldDescriptor::new("launchDate", "Launch", Context::Marketing)];
        let getters = build_getter_map(&fields, &Context::Marketing, &locale());
        assert_eq!(getters.resolve("launchDate", &json!({})), None);
        assert_eq!(
            getters.resolve(
                "launchDate",
                &json!({ "marketingData": { "launch": { "date": "2023-11-05" } } })
            ),
            Some(json!("11/05/2023"))
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(FieldKind::for_field("approvalStatus"), FieldKind::Status);
        assert_eq!(FieldKind::for_field("STATUS"), FieldKind::Status);
        assert_eq!(FieldKind::for_field(HTML_FIELD_NAME), FieldKind::Html);
        assert_eq!(FieldKind::for_field("colour"), FieldKind::Text);
    }

    #[test]
    fn test_items_preserve_descriptor_order() {
        let fields = vec![
            FieldDescriptor::new("c", "C", Context::Basic),
            FieldDescriptor::new("a", "A", Context::Basic),
            FieldDescriptor::new("b", "B", Context::Basic),
        ];
        let getters = build_getter_map(&fields, &Context::Basic, &locale());
        let data = json!({ "basicData": { "a": 1, "b": 2.5, "c": ["x", "y"] } });

        let items = build_items_from_fields(&fields, &getters, &data);
        let pairs: Vec<_> = items
            .iter()
            .map(|i| (i.label.as_str(), i.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("C", "x, y"), ("A", "1"), ("B", "2.5")]);
    }

    #[test]
    fn test_resolve_fields_uses_each_descriptor_context() {
        let fields = vec![
            FieldDescriptor::new("plant", "Plant", Context::Sap),
            FieldDescriptor::new("sellable", "Sellable", Context::Basic),
            FieldDescriptor::new("metaTitle", "Meta title", Context::Seo),
        ];
        let data = json!({
            "sapData": { "plant": "DE01" },
            "basicData": { "sellable": false },
            "seoData": { "meta": { "title": "Kettle 2000" } }
        });

        let values: Vec<_> = resolve_fields(&fields, &data, &locale())
            .into_iter()
            .map(|item| item.value)
            .collect();
        assert_eq!(values, vec!["DE01", "No", "Kettle 2000"]);
    }

    #[test]
    fn test_has_resolved_value_ignores_defaults() {
        let fields = vec![FieldDescriptor::new("plant", "Plant", Context::Sap).with_default("none")];
        assert!(!has_resolved_value(&fields, &json!({}), &locale()));
        assert!(!has_resolved_value(&fields, &json!({ "sapData": { "plant": "" } }), &locale()));
        assert!(has_resolved_value(&fields, &json!({ "sapData": { "plant": "DE01" } }), &locale()));
        assert!(!has_resolved_value(&[], &json!({ "sapData": {} }), &locale()));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&json!(null)), None);
        assert_eq!(display_text(&json!("")), None);
        assert_eq!(display_text(&json!([])), None);
        assert_eq!(display_text(&json!({})), None);
        assert_eq!(display_text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(display_text(&json!({ "a": 1 })).as_deref(), Some("{\"a\":1}"));
    }
}

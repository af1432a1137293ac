//! Content block wire models and translation helpers.
//!
//! Responsibilities:
//! - Define the domain-level [`ContentBlock`] consumed by the view core
//! - Define a lenient wire model for the CMS block array
//! - Translate wire blocks into domain blocks, preserving authoring order
//!
//! Notes:
//! - Block order is significant and is never changed here
//! - A `navPath` that is not a string is carried as `None` (the block still renders, it just
//!   contributes nothing to navigation)

use crate::field::{fields_from_value, FieldDescriptor};
use crate::wire;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Presentation toggles authored on a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BlockFlags {
    pub show: bool,
    pub download: bool,
    pub export: bool,
    pub share: bool,
}

impl Default for BlockFlags {
    fn default() -> Self {
        Self {
            show: true,
            download: false,
            export: false,
            share: false,
        }
    }
}

/// Domain-level carrier for one CMS content block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Block identifier as authored (numeric ids are rendered as text).
    pub id: String,

    /// CMS component type, for example `"fieldTable"` or `"richText"`.
    pub component_type: String,

    pub title: String,

    /// Slash-delimited navigation path, when the CMS supplied a string.
    pub nav_path: Option<String>,

    pub fields: Vec<FieldDescriptor>,

    pub flags: BlockFlags,

    /// The block exactly as it arrived on the wire.
    pub raw_config: Value,
}

impl ContentBlock {
    /// Creates a block with no fields and default flags.
    pub fn new(id: impl Into<String>, title: impl Into<String>, nav_path: Option<&str>) -> Self {
        Self {
            id: id.into(),
            component_type: String::new(),
            title: title.into(),
            nav_path: nav_path.map(str::to_string),
            fields: Vec::new(),
            flags: BlockFlags::default(),
            raw_config: Value::Null,
        }
    }

    /// Replaces the field descriptors of this block.
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }
}

// ============================================================================
// Translation helpers
// ============================================================================

/// Translate a wire block list into domain blocks.
///
/// # Arguments
///
/// * `value` - The decoded CMS document; expected to be an array of block objects.
///
/// # Returns
///
/// The translated blocks in authoring order. A non-array document yields an empty list and
/// entries that are not objects are skipped. Mistyped attributes fall back to their defaults
/// without dropping the block. All three cases are logged.
pub fn blocks_from_value(value: &Value) -> Vec<ContentBlock> {
    let Some(items) = value.as_array() else {
        tracing::warn!("CMS block document is not an array; rendering no blocks");
        return Vec::new();
    };

    let mut blocks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_path_to_error::deserialize::<_, BlockWire>(item) {
            Ok(block) => blocks.push(wire_to_domain(index, block, item)),
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                tracing::warn!(
                    "skipping CMS block {index}: schema mismatch at {path}: {}",
                    err.inner()
                );
            }
        }
    }
    blocks
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Every attribute is read as raw JSON and typed per attribute in [`wire_to_domain`], so only
/// an entry that is not an object fails deserialisation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockWire {
    #[serde(default)]
    id: Value,
    #[serde(default, alias = "component")]
    component_type: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    nav_path: Value,
    #[serde(default)]
    fields: Value,
    #[serde(default)]
    show: Value,
    #[serde(default)]
    download: Value,
    #[serde(default)]
    export: Value,
    #[serde(default)]
    share: Value,
}

fn wire_to_domain(index: usize, block: BlockWire, raw: &Value) -> ContentBlock {
    let owner = format!("CMS block {index}");
    let id = wire::identifier(&block.id, "id", &owner).unwrap_or_else(|| format!("block-{index}"));

    let nav_path = match block.nav_path {
        Value::String(path) => Some(path),
        Value::Null => None,
        other => {
            tracing::warn!("CMS block {id} has a non-string navPath ({other}); ignoring it");
            None
        }
    };

    let defaults = BlockFlags::default();
    ContentBlock {
        id,
        component_type: wire::text(&block.component_type, "componentType", &owner).unwrap_or_default(),
        title: wire::text(&block.title, "title", &owner).unwrap_or_default(),
        nav_path,
        fields: fields_from_value(&block.fields),
        flags: BlockFlags {
            show: wire::flag(&block.show, "show", &owner).unwrap_or(defaults.show),
            download: wire::flag(&block.download, "download", &owner).unwrap_or(defaults.download),
            export: wire::flag(&block.export, "export", &owner).unwrap_or(defaults.export),
            share: wire::flag(&block.share, "share", &owner).unwrap_or(defaults.share),
        },
        raw_config: raw.clone(),
    }
}

//! Data presence per navigation sub-item.
//!
//! A sub-item (`root/sub-item` in a block's `navPath`) has data when at least one block filed
//! under it has a field that resolves to a displayable value. Presence is keyed by normalized
//! titles, so it follows the same identity rules as the navigation tree.

use crate::i18n::Locale;
use crate::resolver::has_resolved_value;
use crate::tree::path_segments;
use cms::ContentBlock;
use pdv_types::NormalizedKey;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataPresence {
    sub_items: HashMap<(NormalizedKey, NormalizedKey), bool>,
}

impl DataPresence {
    /// Computes presence for every `root/sub-item` pair named by `blocks`.
    pub fn from_blocks(blocks: &[ContentBlock], data: &Value, locale: &Locale) -> Self {
        let mut presence = Self::default();

        for block in blocks {
            let Some(nav_path) = block.nav_path.as_deref() else {
                continue;
            };
            let segments = path_segments(nav_path);
            let [root, sub_item, ..] = segments.as_slice() else {
                continue;
            };

            let present = has_resolved_value(&block.fields, data, locale);
            presence.record(root.key(), sub_item.key(), present);
        }

        presence
    }

    /// Marks a sub-item as present or absent. Presence is sticky: once any block reports data
    /// for a sub-item, later blocks reporting none do not clear it.
    pub fn with_sub_item(mut self, root: &str, sub_item: &str, present: bool) -> Self {
        self.record(NormalizedKey::new(root), NormalizedKey::new(sub_item), present);
        self
    }

    /// Returns true if the sub-item has data. Unknown sub-items have none.
    pub fn has_sub_item(&self, root: &NormalizedKey, sub_item: &NormalizedKey) -> bool {
        self.sub_items
            .get(&(root.clone(), sub_item.clone()))
            .copied()
            .unwrap_or(false)
    }

    fn record(&mut self, root: NormalizedKey, sub_item: NormalizedKey, present: bool) {
        let entry = self.sub_items.entry((root, sub_item)).or_insert(false);
        *entry |= present;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms::{Context, FieldDescriptor};
    use serde_json::json;

    fn block(nav_path: &str, field: &str) -> ContentBlock {
        ContentBlock::new(nav_path, nav_path, Some(nav_path))
            .with_fields(vec![FieldDescriptor::new(field, field, Context::Basic)])
    }

    fn key(s: &str) -> NormalizedKey {
        NormalizedKey::new(s)
    }

    #[test]
    fn test_presence_from_blocks() {
        let blocks = vec![
            block("Basic Data/SKU Data", "sku"),
            block("Basic Data/Info", "colour"),
        ];
        let data = json!({ "basicData": { "colour": "red" } });
        let presence = DataPresence::from_blocks(&blocks, &data, &Locale::default());

        assert!(!presence.has_sub_item(&key("basic data"), &key("sku data")));
        assert!(presence.has_sub_item(&key("Basic Data"), &key("INFO")));
        assert!(!presence.has_sub_item(&key("Marketing"), &key("Seo")));
    }

    #[test]
    fn test_presence_is_or_across_blocks() {
        let blocks = vec![
            block("Basic Data/Info", "colour"),
            block("basic data/info", "missing"),
        ];
        let data = json!({ "basicData": { "colour": "red" } });
        let presence = DataPresence::from_blocks(&blocks, &data, &Locale::default());
        assert!(presence.has_sub_item(&key("Basic Data"), &key("Info")));
    }

    #[test]
    fn test_root_only_paths_record_nothing() {
        let presence = DataPresence::from_blocks(
            &[block("Basic Data", "colour")],
            &json!({ "basicData": { "colour": "red" } }),
            &Locale::default(),
        );
        assert_eq!(presence, DataPresence::default());
    }
}

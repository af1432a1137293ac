//! Sidebar entries: root navigation nodes with their displayable sub-items.
//!
//! Filtering rules:
//! - external mode shows a sub-item only if it has data;
//! - internal mode shows every sub-item, except the legacy `SKU Data` sub-item, which is
//!   always gated on data presence;
//! - external mode drops a root whose sub-items were all filtered out, internal mode keeps it.

use crate::constants::LEGACY_GATED_SUB_ITEM;
use crate::i18n::Translator;
use crate::mode::DisplayMode;
use crate::presence::DataPresence;
use crate::tree::PathNode;
use pdv_types::{NormalizedKey, Slug};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubItem {
    /// Title as authored.
    pub title: String,
    pub id: Slug,
    /// Title rendered in the active locale.
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    pub title: String,
    pub id: Slug,
    pub label: String,
    pub sub_items: Vec<SubItem>,
}

impl SidebarEntry {
    pub fn sub_item_titles(&self) -> Vec<&str> {
        self.sub_items.iter().map(|item| item.title.as_str()).collect()
    }
}

/// Derives the sidebar from a navigation tree.
///
/// # Arguments
///
/// * `tree` - Root nodes from [`crate::tree::build_tree`].
/// * `mode` - The active display mode.
/// * `presence` - Data presence per sub-item.
/// * `translator` - Renders titles into labels; untranslated titles are shown as authored.
pub fn build_sidebar(
    tree: &[PathNode],
    mode: DisplayMode,
    presence: &DataPresence,
    translator: &dyn Translator,
) -> Vec<SidebarEntry> {
    let legacy_key = NormalizedKey::new(LEGACY_GATED_SUB_ITEM);

    tree.iter()
        .filter_map(|root| {
            let sub_items: Vec<SubItem> = root
                .children()
                .iter()
                .filter(|child| {
                    let gated = mode.is_external() || *child.key() == legacy_key;
                    !gated || presence.has_sub_item(root.key(), child.key())
                })
                .map(|child| SubItem {
                    title: child.title().to_string(),
                    id: child.id().clone(),
                    label: translator.text(child.title()),
                })
                .collect();

            if sub_items.is_empty() && mode.is_external() {
                tracing::debug!("hiding navigation root {} with no data", root.title());
                return None;
            }

            Some(SidebarEntry {
                title: root.title().to_string(),
                id: root.id().clone(),
                label: translator.text(root.title()),
                sub_items,
            })
        })
        .collect()
}

//! Navigation tree reconstruction from CMS path strings.
//!
//! Each content block carries a slash-delimited `navPath` such as `Basic Data/SKU Data`. The
//! tree is rebuilt purely from these strings:
//!
//! - blocks are visited in authoring order, and nodes keep the order their title first appeared;
//! - node identity is the [`NormalizedKey`] of the title, so `Basic Data` and `basic data `
//!   are one node;
//! - the casing of the first occurrence is kept, and later occurrences never rename a node;
//! - blocks without a usable path contribute nothing.

use cms::ContentBlock;
use pdv_types::{NonEmptyText, NormalizedKey, Slug};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathNode {
    title: NonEmptyText,
    id: Slug,
    #[serde(skip)]
    key: NormalizedKey,
    children: Vec<PathNode>,
    #[serde(skip)]
    child_index: HashMap<NormalizedKey, usize>,
}

impl PathNode {
    fn new(title: NonEmptyText) -> Self {
        Self {
            id: Slug::new(title.as_str()),
            key: title.key(),
            title,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Title as it was first seen.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn id(&self) -> &Slug {
        &self.id
    }

    pub fn key(&self) -> &NormalizedKey {
        &self.key
    }

    /// Children in first-seen order.
    pub fn children(&self) -> &[PathNode] {
        &self.children
    }

    /// Titles of the direct children, in order.
    pub fn child_titles(&self) -> Vec<&str> {
        self.children.iter().map(PathNode::title).collect()
    }

    /// Finds a direct child by (normalized) title.
    pub fn child(&self, title: &str) -> Option<&PathNode> {
        let index = *self.child_index.get(&NormalizedKey::new(title))?;
        self.children.get(index)
    }
}

/// Splits a navigation path into trimmed, non-empty segments.
pub fn path_segments(nav_path: &str) -> Vec<NonEmptyText> {
    nav_path
        .split('/')
        .filter_map(|segment| NonEmptyText::new(segment).ok())
        .collect()
}

/// Builds the navigation tree from content blocks.
///
/// # Arguments
///
/// * `blocks` - Content blocks in authoring order.
///
/// # Returns
///
/// The root nodes in first-seen order. Identical input always yields an identical tree.
pub fn build_tree(blocks: &[ContentBlock]) -> Vec<PathNode> {
    let mut roots = Vec::new();
    let mut root_index = HashMap::new();

    for block in blocks {
        let Some(nav_path) = block.nav_path.as_deref() else {
            continue;
        };
        let segments = path_segments(nav_path);
        if segments.is_empty() {
            tracing::debug!("block {} has a blank navPath; not placed in navigation", block.id);
            continue;
        }
        insert_path(&mut roots, &mut root_index, &segments);
    }

    roots
}

/// Builds the navigation tree straight from a decoded CMS document.
///
/// A document that is not a block array yields an empty tree.
pub fn build_tree_from_value(document: &Value) -> Vec<PathNode> {
    build_tree(&cms::blocks_from_value(document))
}

fn insert_path(
    siblings: &mut Vec<PathNode>,
    index: &mut HashMap<NormalizedKey, usize>,
    segments: &[NonEmptyText],
) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    let position = match index.get(&segment.key()) {
        Some(&position) => position,
        None => {
            siblings.push(PathNode::new(segment.clone()));
            let position = siblings.len() - 1;
            index.insert(segment.key(), position);
            position
        }
    };

    let node = &mut siblings[position];
    insert_path(&mut node.children, &mut node.child_index, rest);
}

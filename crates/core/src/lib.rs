//! # PDV Core
//!
//! Core logic for the product detail view.
//!
//! This crate turns CMS content blocks and a product data payload into what the view renders:
//! - the navigation tree, rebuilt from slash-delimited block paths
//! - the sidebar, filtered by display mode and data presence
//! - display-ready field values, resolved through explicit, overridden or conventional paths
//! - per-section visibility, and click-to-scroll navigation targets
//!
//! **No I/O concerns**: Reading documents and parsing wire formats belongs in `cms`; reading
//! the environment and printing output belongs in the `pdv` binary. Nothing here fails on
//! malformed content; it degrades to empty output or placeholder values.

pub mod accessor;
pub mod coalesce;
pub mod config;
pub mod constants;
pub mod error;
pub mod i18n;
pub mod mode;
pub mod navigation;
pub mod presence;
pub mod resolver;
pub mod sidebar;
pub mod transform;
pub mod tree;
pub mod view;
pub mod visibility;

pub use accessor::{get, is_present, FieldPath};
pub use coalesce::{display_mode_writer, CoalescingWriter};
pub use config::ViewConfig;
pub use error::{ViewError, ViewResult};
pub use i18n::{Catalog, Locale, NoTranslation, Translator};
pub use mode::DisplayMode;
pub use navigation::{NavigationDispatcher, NavigationTarget, NAVIGATION_TARGETS};
pub use presence::DataPresence;
pub use resolver::{
    build_getter_map, build_items_from_fields, resolve_fields, FieldKind, GetterMap,
    ResolvedField,
};
pub use sidebar::{build_sidebar, SidebarEntry, SubItem};
pub use transform::Transformer;
pub use tree::{build_tree, build_tree_from_value, PathNode};
pub use view::{ContentKey, ProductView, SectionView, ViewCache, ViewInputs};
pub use visibility::{should_show, SectionId, SectionSignals, SectionVisibility};

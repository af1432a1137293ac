//! Full view composition and memoization.
//!
//! [`ProductView::compute`] runs every stage (tree, presence, sidebar, field resolution and
//! section visibility) over one set of inputs. [`ViewCache`] keeps the last result and only
//! recomputes when the content key of the inputs changes.

use crate::config::ViewConfig;
use crate::error::{ViewError, ViewResult};
use crate::i18n::{Locale, Translator};
use crate::mode::DisplayMode;
use crate::presence::DataPresence;
use crate::resolver::{has_resolved_value, resolve_fields, ResolvedField};
use crate::sidebar::{build_sidebar, SidebarEntry};
use crate::tree::build_tree;
use crate::visibility::{should_show, SectionSignals, SectionVisibility};
use cms::ContentBlock;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Everything a view depends on apart from the translator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInputs {
    pub blocks: Vec<ContentBlock>,
    pub payload: Value,
    pub display_mode: DisplayMode,
    pub locale: Locale,
}

impl ViewInputs {
    /// Inputs using the configured default mode and locale.
    pub fn new(blocks: Vec<ContentBlock>, payload: Value, config: &ViewConfig) -> Self {
        Self {
            blocks,
            payload,
            display_mode: config.default_display_mode(),
            locale: config.default_locale().clone(),
        }
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// SHA-256 over the canonical JSON encoding of the inputs.
    pub fn content_key(&self) -> ViewResult<ContentKey> {
        let bytes = serde_json::to_vec(self).map_err(ViewError::ContentKey)?;
        let digest = Sha256::digest(&bytes);
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Ok(ContentKey(key))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentKey([u8; 32]);

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// One rendered content block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub block_id: String,
    pub title: String,
    pub fields: Vec<ResolvedField>,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductView {
    pub sidebar: Vec<SidebarEntry>,
    pub sections: Vec<SectionView>,
    pub visibility: SectionVisibility,
}

impl ProductView {
    pub fn compute(inputs: &ViewInputs, translator: &dyn Translator) -> Self {
        let ViewInputs {
            blocks,
            payload,
            display_mode,
            locale,
        } = inputs;
        let mode = *display_mode;

        let tree = build_tree(blocks);
        let presence = DataPresence::from_blocks(blocks, payload, locale);
        let sidebar = build_sidebar(&tree, mode, &presence, translator);

        let sections = blocks
            .iter()
            .map(|block| {
                let has_data = has_resolved_value(&block.fields, payload, locale);
                SectionView {
                    block_id: block.id.clone(),
                    title: translator.text(&block.title),
                    fields: resolve_fields(&block.fields, payload, locale),
                    visible: block.flags.show && should_show(has_data, mode),
                }
            })
            .collect();

        let visibility = SectionVisibility::evaluate(&SectionSignals::from_payload(payload), mode);

        tracing::debug!(
            "computed view: {} sidebar roots, {} sections, mode {mode}, locale {locale}",
            sidebar.len(),
            blocks.len()
        );

        Self {
            sidebar,
            sections,
            visibility,
        }
    }
}

/// Single-entry memo of the last computed view.
///
/// The key covers [`ViewInputs`] only. Call [`ViewCache::invalidate`] after swapping the
/// translation catalog for an unchanged locale.
#[derive(Debug, Default)]
pub struct ViewCache {
    last: Option<(ContentKey, Arc<ProductView>)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached view when the inputs are unchanged, otherwise recomputes it.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::ContentKey` if the inputs cannot be encoded for hashing.
    pub fn get_or_compute(
        &mut self,
        inputs: &ViewInputs,
        translator: &dyn Translator,
    ) -> ViewResult<Arc<ProductView>> {
        let key = inputs.content_key()?;

        if let Some((cached_key, view)) = &self.last {
            if *cached_key == key {
                tracing::debug!("view cache hit for {key}");
                return Ok(Arc::clone(view));
            }
        }

        let view = Arc::new(ProductView::compute(inputs, translator));
        self.last = Some((key, Arc::clone(&view)));
        Ok(view)
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

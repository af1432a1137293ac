//! Click-to-scroll navigation.
//!
//! Sidebar labels reach the dispatcher already translated, with no stable key attached. To
//! find the scroll target, every table entry's label key is translated in the *current*
//! locale and compared to the clicked label (trimmed, uppercased). Two keys that translate to
//! the same text in one locale are ambiguous; the first entry wins and
//! [`NavigationDispatcher::ambiguous_labels`] reports the collision.
//!
//! [`NavigationDispatcher::resolve_key`] offers the locale-independent lookup for callers that
//! do carry the label key.

use crate::i18n::Translator;
use crate::visibility::SectionId;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub section: SectionId,
    /// Translation key of the sub-item label.
    pub label_key: &'static str,
    /// Anchor to scroll to.
    pub target: &'static str,
}

const fn entry(
    section: SectionId,
    label_key: &'static str,
    target: &'static str,
) -> NavigationTarget {
    NavigationTarget {
        section,
        label_key,
        target,
    }
}

/// Registered scroll targets, in lookup order.
pub const NAVIGATION_TARGETS: &[NavigationTarget] = &[
    entry(SectionId::BasicData, "navigation.basicData.skuData", "sku-data"),
    entry(SectionId::BasicData, "navigation.basicData.info", "basic-info"),
    entry(SectionId::BasicData, "navigation.basicData.sapData", "sap-data"),
    entry(SectionId::MarketingData, "navigation.marketingData.texts", "marketing-texts"),
    entry(SectionId::MarketingData, "navigation.marketingData.seo", "seo-data"),
    entry(SectionId::MarketingData, "navigation.marketingData.productCard", "product-card"),
    entry(SectionId::References, "navigation.references.bundles", "bundles"),
    entry(SectionId::References, "navigation.references.components", "components"),
    entry(SectionId::References, "navigation.references.accessories", "accessories"),
    entry(SectionId::Packaging, "navigation.packaging.units", "packaging-units"),
    entry(SectionId::Specifications, "navigation.specifications.technical", "technical-specifications"),
    entry(SectionId::MarketingCollaterals, "navigation.collaterals.images", "collateral-images"),
    entry(SectionId::MarketingCollaterals, "navigation.collaterals.videos", "collateral-videos"),
    entry(SectionId::MarketingCollaterals, "navigation.collaterals.documents", "collateral-documents"),
    entry(SectionId::AfterService, "navigation.afterService.spareParts", "spare-parts"),
    entry(SectionId::AfterService, "navigation.afterService.warranty", "warranty"),
    entry(SectionId::AfterService, "navigation.afterService.serviceManuals", "service-manuals"),
    entry(SectionId::Compliance, "navigation.compliance.certificates", "certificates"),
    entry(SectionId::Compliance, "navigation.compliance.dangerousGoods", "dangerous-goods"),
];

#[derive(Clone, Debug)]
pub struct NavigationDispatcher {
    entries: Vec<NavigationTarget>,
}

impl Default for NavigationDispatcher {
    fn default() -> Self {
        Self::new(NAVIGATION_TARGETS.to_vec())
    }
}

impl NavigationDispatcher {
    pub fn new(entries: Vec<NavigationTarget>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[NavigationTarget] {
        &self.entries
    }

    /// Resolves a clicked, already translated label to its scroll target.
    ///
    /// Returns `None` (and logs) when no entry translates to the same text.
    pub fn resolve_label(&self, label: &str, translator: &dyn Translator) -> Option<&'static str> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }

        let found = self
            .entries
            .iter()
            .find(|entry| normalize_label(&translator.text(entry.label_key)) == wanted)
            .map(|entry| entry.target);

        if found.is_none() {
            tracing::debug!(
                "no navigation target for label {label:?} in locale {}",
                translator.locale()
            );
        }
        found
    }

    /// Resolves a label key directly, independent of locale.
    pub fn resolve_key(&self, label_key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.label_key == label_key)
            .map(|entry| entry.target)
    }

    /// Returns a closure resolving labels in the translator's locale.
    pub fn target_resolver<'a>(
        &'a self,
        translator: &'a dyn Translator,
    ) -> impl Fn(&str) -> Option<&'static str> + 'a {
        move |label| self.resolve_label(label, translator)
    }

    /// Lists translated labels shared by more than one label key in the translator's locale.
    pub fn ambiguous_labels(&self, translator: &dyn Translator) -> BTreeMap<String, Vec<&'static str>> {
        let mut by_label: BTreeMap<String, Vec<&'static str>> = BTreeMap::new();
        for entry in &self.entries {
            let keys = by_label
                .entry(normalize_label(&translator.text(entry.label_key)))
                .or_default();
            if !keys.contains(&entry.label_key) {
                keys.push(entry.label_key);
            }
        }

        by_label.retain(|_, keys| keys.len() > 1);
        by_label
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_uppercase()
}

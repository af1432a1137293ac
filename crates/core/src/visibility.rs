//! Section visibility evaluation.
//!
//! Each named section has a presence flag computed as an OR over its own sub-signals, all
//! read from the data payload through the accessor. Visibility then depends only on the display
//! mode: internal always shows, external shows exactly what is present.

use crate::accessor::{get, is_present};
use crate::i18n::Locale;
use crate::mode::DisplayMode;
use crate::transform::Transformer;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named sections of the product detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionId {
    BasicData,
    MarketingData,
    References,
    Packaging,
    Specifications,
    MarketingCollaterals,
    AfterService,
    Compliance,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::BasicData,
        SectionId::MarketingData,
        SectionId::References,
        SectionId::Packaging,
        SectionId::Specifications,
        SectionId::MarketingCollaterals,
        SectionId::AfterService,
        SectionId::Compliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::BasicData => "basicData",
            SectionId::MarketingData => "marketingData",
            SectionId::References => "references",
            SectionId::Packaging => "packaging",
            SectionId::Specifications => "specifications",
            SectionId::MarketingCollaterals => "marketingCollaterals",
            SectionId::AfterService => "afterService",
            SectionId::Compliance => "compliance",
        }
    }
}

/// Decides whether a section renders.
///
/// External mode returns `present` unchanged; internal mode always shows.
pub fn should_show(present: bool, mode: DisplayMode) -> bool {
    match mode {
        DisplayMode::External => present,
        DisplayMode::Internal => true,
    }
}

/// Per-topic data signals feeding the section presence flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSignals {
    pub basic: bool,
    pub sap: bool,

    pub marketing: bool,
    pub seo: bool,
    pub product_card: bool,

    pub bundles: bool,
    pub components: bool,
    pub accessories: bool,

    pub packaging: bool,
    pub specifications: bool,

    pub images: bool,
    pub videos: bool,
    pub documents: bool,

    pub spare_parts: bool,
    pub warranty: bool,
    pub service_manuals: bool,

    pub certificates: bool,
    pub declarations: bool,
    pub test_reports: bool,
    pub dangerous_goods: bool,
}

impl SectionSignals {
    /// Reads every signal from the data payload. Missing topics count as absent.
    pub fn from_payload(data: &Value) -> Self {
        let has = |path: &str| is_present(get(data, path));

        Self {
            basic: has("basicData"),
            sap: has("sapData"),

            marketing: has("marketingData"),
            seo: has("seoData"),
            product_card: has("productCardData"),

            bundles: has("referenceRelationship.bundles"),
            components: has("referenceRelationship.components"),
            accessories: has("referenceRelationship.accessories"),

            packaging: has("packagingData"),
            specifications: has("specificationData"),

            images: has("marketingCollaterals.images"),
            videos: has("marketingCollaterals.videos"),
            documents: has("marketingCollaterals.documents"),

            spare_parts: has("afterService.spareParts"),
            warranty: has("afterService.warranty"),
            service_manuals: has("afterService.serviceManuals"),

            certificates: has("complianceCertifications.certificates"),
            declarations: has("complianceCertifications.declarations"),
            test_reports: has("complianceCertifications.testReports"),
            dangerous_goods: dangerous_goods_present(data),
        }
    }

    /// Presence flag for one section.
    pub fn presence(&self, section: SectionId) -> bool {
        match section {
            SectionId::BasicData => self.basic || self.sap,
            SectionId::MarketingData => self.marketing || self.seo || self.product_card,
            SectionId::References => self.bundles || self.components || self.accessories,
            SectionId::Packaging => self.packaging,
            SectionId::Specifications => self.specifications,
            SectionId::MarketingCollaterals => self.images || self.videos || self.documents,
            SectionId::AfterService => self.spare_parts || self.warranty || self.service_manuals,
            SectionId::Compliance => {
                self.certificates || self.declarations || self.test_reports || self.dangerous_goods
            }
        }
    }
}

/// Dangerous goods count as present when either the classification or the yes/no flag has
/// non-blank text. A boolean flag is read as its `Yes`/`No` rendering.
fn dangerous_goods_present(data: &Value) -> bool {
    let non_blank = |value: Option<&Value>| {
        value
            .map(|v| Transformer::BooleanToString.apply(v, &Locale::default()))
            .and_then(|v| v.as_str().map(|s| !s.trim().is_empty()))
            .unwrap_or(false)
    };

    non_blank(get(data, "complianceCertifications.dangerousGoods.classification"))
        || non_blank(get(data, "complianceCertifications.dangerousGoods.isDangerousGoods"))
}

/// Visibility flag per named section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionVisibility(BTreeMap<SectionId, bool>);

impl SectionVisibility {
    /// Evaluates every section for `mode`.
    pub fn evaluate(signals: &SectionSignals, mode: DisplayMode) -> Self {
        Self(
            SectionId::ALL
                .iter()
                .map(|&section| (section, should_show(signals.presence(section), mode)))
                .collect(),
        )
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.0.get(&section).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, bool)> + '_ {
        self.0.iter().map(|(section, visible)| (*section, *visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_should_show_truth_table() {
        assert!(should_show(true, DisplayMode::Internal));
        assert!(should_show(true, DisplayMode::External));
        assert!(should_show(false, DisplayMode::Internal));
        assert!(!should_show(false, DisplayMode::External));
    }

    #[test]
    fn test_references_hidden_externally_without_items() {
        let signals = SectionSignals {
            bundles: false,
            components: false,
            accessories: false,
            ..SectionSignals::default()
        };

        let external = SectionVisibility::evaluate(&signals, DisplayMode::External);
        assert!(!external.is_visible(SectionId::References));

        let internal = SectionVisibility::evaluate(&signals, DisplayMode::Internal);
        assert!(internal.is_visible(SectionId::References));
    }

    #[test]
    fn test_any_reference_list_makes_references_present() {
        let data = json!({ "referenceRelationship": { "bundles": [], "accessories": [{ "sku": "A1" }] } });
        let signals = SectionSignals::from_payload(&data);
        assert!(!signals.bundles);
        assert!(signals.accessories);
        assert!(signals.presence(SectionId::References));
    }

    #[test]
    fn test_dangerous_goods_presence() {
        let blank = json!({ "complianceCertifications": { "dangerousGoods": { "classification": "  ", "isDangerousGoods": "" } } });
        assert!(!SectionSignals::from_payload(&blank).presence(SectionId::Compliance));

        let classified = json!({ "complianceCertifications": { "dangerousGoods": { "classification": "UN3480" } } });
        assert!(SectionSignals::from_payload(&classified).presence(SectionId::Compliance));

        let flagged = json!({ "complianceCertifications": { "dangerousGoods": { "isDangerousGoods": "No" } } });
        assert!(SectionSignals::from_payload(&flagged).dangerous_goods);

        let boolean = json!({ "complianceCertifications": { "dangerousGoods": { "isDangerousGoods": false } } });
        assert!(SectionSignals::from_payload(&boolean).dangerous_goods);
    }

    #[test]
    fn test_compliance_certificate_lists() {
        let data = json!({ "complianceCertifications": { "certificates": [], "testReports": ["r.pdf"] } });
        let signals = SectionSignals::from_payload(&data);
        assert!(!signals.certificates);
        assert!(signals.test_reports);
        assert!(signals.presence(SectionId::Compliance));
    }

    #[test]
    fn test_evaluate_on_empty_payload() {
        let signals = SectionSignals::from_payload(&json!({}));
        let external = SectionVisibility::evaluate(&signals, DisplayMode::External);
        let internal = SectionVisibility::evaluate(&signals, DisplayMode::Internal);

        for section in SectionId::ALL {
            assert!(!external.is_visible(section), "{} should be hidden", section.as_str());
            assert!(internal.is_visible(section), "{} should be shown", section.as_str());
        }
    }

    #[test]
    fn test_basic_data_from_sap_only() {
        let signals = SectionSignals::from_payload(&json!({ "sapData": { "plant": "DE01" } }));
        let external = SectionVisibility::evaluate(&signals, DisplayMode::External);
        assert!(external.is_visible(SectionId::BasicData));
        assert!(!external.is_visible(SectionId::MarketingData));
    }
}

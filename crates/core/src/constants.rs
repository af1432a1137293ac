//! Constants used throughout the product detail view core.
//!
//! Display placeholders, legacy names and defaults live here so that each is defined once.

/// Display value for a field that resolved to nothing and has no default.
pub const MISSING_VALUE: &str = "-";

/// Field rendered as rich text rather than plain text.
pub const HTML_FIELD_NAME: &str = "longDescription";

/// Legacy sub-item whose visibility is always gated on data presence, in every display mode.
pub const LEGACY_GATED_SUB_ITEM: &str = "SKU Data";

/// Separator used by the `arrayToString` transformer.
pub const ARRAY_JOIN_SEPARATOR: &str = ", ";

/// Default debounce for writing the selected display mode back to the URL.
pub const DEFAULT_DEBOUNCE_MS: u64 = 120;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Query parameter carrying the display mode.
pub const DISPLAY_MODE_QUERY_KEY: &str = "mode";

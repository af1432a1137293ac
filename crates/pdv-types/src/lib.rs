//! Validated text primitives shared by the product detail view crates.
//!
//! Navigation titles arrive as free text from the CMS. These types pin down the three
//! representations the rest of the workspace relies on:
//! - [`NonEmptyText`]: trimmed, guaranteed non-empty display text.
//! - [`NormalizedKey`]: the identity of a title (trimmed and case-folded).
//! - [`Slug`]: an anchor-safe identifier derived from a title.

/// Fallback identifier used when a title slugifies to nothing.
pub const FALLBACK_SLUG: &str = "section";

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("navigation title is blank")]
    Empty,
}

/// One usable navigation path segment, such as `Basic Data` in `Basic Data/SKU Data`.
///
/// Surrounding whitespace is dropped; the casing is kept as authored because the first
/// occurrence of a title is the one the sidebar shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Fails with [`TextError::Empty`] for a blank segment (`"Basic Data//SKU"` has one).
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            title => Ok(Self(title.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which this title merges with differently cased or spaced spellings.
    pub fn key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.0)
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let title = String::deserialize(deserializer)?;
        NonEmptyText::new(title).map_err(serde::de::Error::custom)
    }
}

/// Case- and whitespace-insensitive identity of a title.
///
/// Two titles are the same navigation node exactly when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(input: impl AsRef<str>) -> Self {
        Self(input.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anchor-safe identifier derived from a title.
///
/// Lowercases the input, collapses every run of non-alphanumeric characters into a single
/// hyphen and trims leading/trailing hyphens. Inputs with no alphanumeric characters map to
/// [`FALLBACK_SLUG`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(input: impl AsRef<str>) -> Self {
        let mut out = String::new();
        let mut pending_hyphen = false;

        for c in input.as_ref().chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        if out.is_empty() {
            out.push_str(FALLBACK_SLUG);
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Document-level parsing for CMS exports and companion JSON/YAML files.
//!
//! The view core only ever sees decoded values. These helpers turn text (or files on disk) into
//! those values, choosing YAML or JSON by file extension.

use crate::block::{blocks_from_value, ContentBlock};
use crate::CmsResult;
use serde_json::Value;
use std::path::Path;

/// Parse a JSON CMS export into content blocks.
///
/// # Errors
///
/// Returns [`crate::CmsError::InvalidJson`] if `text` is not JSON. Structural problems inside
/// valid JSON are tolerated (see [`blocks_from_value`]).
pub fn parse_blocks_json(text: &str) -> CmsResult<Vec<ContentBlock>> {
    let value: Value = serde_json::from_str(text)?;
    Ok(blocks_from_value(&value))
}

/// Parse a YAML CMS export into content blocks.
///
/// # Errors
///
/// Returns [`crate::CmsError::InvalidYaml`] if `text` is not YAML.
pub fn parse_blocks_yaml(text: &str) -> CmsResult<Vec<ContentBlock>> {
    let value: Value = serde_yaml::from_str(text)?;
    Ok(blocks_from_value(&value))
}

/// Read a JSON or YAML document from disk.
///
/// Files ending in `.yaml` or `.yml` are decoded as YAML; everything else as JSON.
///
/// # Errors
///
/// Returns a [`crate::CmsError`] if the file cannot be read or decoded.
pub fn read_document(path: &Path) -> CmsResult<Value> {
    let text = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(&text)?)
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Read a CMS export from disk and translate it into content blocks.
///
/// # Errors
///
/// Returns a [`crate::CmsError`] if the file cannot be read or decoded.
pub fn read_blocks_file(path: &Path) -> CmsResult<Vec<ContentBlock>> {
    let value = read_document(path)?;
    Ok(blocks_from_value(&value))
}

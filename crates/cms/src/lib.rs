//! CMS wire/boundary support for the product detail view.
//!
//! This crate provides **wire models** and **translation helpers** for the ordered list of
//! content blocks authored in the CMS:
//! - JSON or YAML documents holding a block array
//! - per-block field descriptors declaring what each display cell shows
//!
//! This crate focuses on:
//! - lenient deserialisation (CMS content must never crash rendering)
//! - translation between wire structs and domain types
//!
//! Malformed blocks are skipped with a warning rather than failing the whole document. Only
//! unreadable documents (I/O failures, text that is not JSON/YAML at all) surface as errors.

pub mod block;
pub mod document;
pub mod field;
mod wire;

// Re-export public domain-level types
pub use block::{blocks_from_value, BlockFlags, ContentBlock};
pub use document::{parse_blocks_json, parse_blocks_yaml, read_blocks_file, read_document};
pub use field::{fields_from_value, Context, FieldDescriptor};

/// Errors returned by the `cms` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results that can fail with a [`CmsError`].
pub type CmsResult<T> = Result<T, CmsError>;

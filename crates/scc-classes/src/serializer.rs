//! JSON persistence for class entries.
//!
//! Interval fields carry a `"kind": "interval"` marker, so time and date
//! ranges decode back to the same typed values rather than loose objects.

use crate::error::Result;
use crate::models::ClassEntry;

/// Encodes class entries as compact JSON.
pub fn serialize(entries: &[ClassEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Encodes class entries as indented JSON.
pub fn serialize_pretty(entries: &[ClassEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Decodes class entries from JSON.
///
/// # Errors
///
/// Returns `Error::Json` if the text is not a valid list of class entries.
pub fn deserialize(json: &str) -> Result<Vec<ClassEntry>> {
    Ok(serde_json::from_str(json)?)
}

//! Recover a prompt structure from buffered completion text.
//!
//! Model output may wrap the JSON object in markdown fences or prose. The
//! caller buffers the whole stream, then this module slices from the first
//! `{` to the last `}`, parses once and sanitizes before the structure
//! reaches the assembly engine.

use serde_json::Value;

use crate::error::CoreError;
use crate::sanitize::sanitize_in_place;
use crate::structure::{parse_structure, PromptStructure};
use crate::types::Language;

/// Slice of `text` spanning the first `{` through the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Decode the JSON object embedded in `text` into a sanitized value.
pub fn extract_value(text: &str) -> Result<Value, CoreError> {
    let json = extract_json_object(text).ok_or_else(|| {
        CoreError::StructuringFailed("no JSON object found in completion output".to_string())
    })?;

    let mut value: Value = serde_json::from_str(json)
        .map_err(|e| CoreError::StructuringFailed(format!("invalid JSON: {e}")))?;
    sanitize_in_place(&mut value);
    Ok(value)
}

/// Full pipeline: extract, parse, sanitize, decode either schema, upgrade.
pub fn structure_from_completion(
    text: &str,
    language: Language,
) -> Result<PromptStructure, CoreError> {
    let value = extract_value(text)?;
    parse_structure(value, language).map_err(|e| match e {
        CoreError::Validation(msg) => CoreError::StructuringFailed(msg),
        other => other,
    })
}

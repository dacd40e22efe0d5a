//! Placeholder scrubbing for structures decoded from model output.
//!
//! The completion instructions ask for empty strings instead of filler such
//! as "None" or "无", but model compliance is not guaranteed. The sanitizer
//! walks any JSON value and blanks out those strings without touching keys
//! or other content.

use serde_json::Value;

/// Filler words treated as empty content, compared trimmed and lowercased.
pub const FORBIDDEN_PLACEHOLDERS: &[&str] =
    &["无", "none", "n/a", "not applicable", "null", "undefined"];

pub fn is_placeholder(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    FORBIDDEN_PLACEHOLDERS.contains(&lowered.as_str())
}

/// Replace placeholder strings at every depth with `""`.
pub fn sanitize_in_place(value: &mut Value) {
    match value {
        Value::String(s) => {
            if is_placeholder(s) {
                s.clear();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize_in_place),
        Value::Object(map) => map.values_mut().for_each(sanitize_in_place),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

pub fn sanitize_value(mut value: Value) -> Value {
    sanitize_in_place(&mut value);
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blanks_top_level_placeholders() {
        let out = sanitize_value(json!({ "subject": "None", "style": "watercolor" }));
        assert_eq!(out, json!({ "subject": "", "style": "watercolor" }));
    }

    #[test]
    fn blanks_nested_placeholders_and_keeps_keys() {
        let out = sanitize_value(json!({
            "modifiers": { "lighting": " 无 ", "details": "fine grain" },
            "technical": { "camera": "N/A", "model": "--v 6.0" }
        }));
        assert_eq!(
            out,
            json!({
                "modifiers": { "lighting": "", "details": "fine grain" },
                "technical": { "camera": "", "model": "--v 6.0" }
            })
        );
    }

    #[test]
    fn treats_arrays_element_wise() {
        let out = sanitize_value(json!(["Not Applicable", "kept", ["undefined", 3]]));
        assert_eq!(out, json!(["", "kept", ["", 3]]));
    }

    #[test]
    fn leaves_scalars_and_legitimate_text_alone() {
        let input = json!({
            "confidence": 0.8,
            "flag": true,
            "missing": null,
            "text": "none of these clouds"
        });
        assert_eq!(sanitize_value(input.clone()), input);
    }

    #[test]
    fn string_root_is_sanitized() {
        assert_eq!(sanitize_value(json!("NULL")), json!(""));
    }
}

//! Request-level input validation. Lengths are counted in characters, not
//! bytes, so CJK input gets the same allowance as ASCII.

use crate::error::CoreError;

/// Maximum length of the free-form description sent for generation.
pub const MAX_USER_INPUT_LENGTH: usize = 8_000;

/// Maximum length of a user-supplied custom style hint.
pub const MAX_CUSTOM_STYLE_LENGTH: usize = 200;

/// Maximum length of raw completion text submitted for structuring.
pub const MAX_STRUCTURE_TEXT_LENGTH: usize = 200_000;

fn check_length(label: &str, text: &str, max: usize) -> Result<(), CoreError> {
    let len = text.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{label} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// User input must be non-empty after trimming and within the length limit.
pub fn validate_user_input(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("User input must not be empty".to_string()));
    }
    check_length("User input", text, MAX_USER_INPUT_LENGTH)
}

/// Length check only (can be empty).
pub fn validate_custom_style(text: &str) -> Result<(), CoreError> {
    check_length("Custom style", text, MAX_CUSTOM_STYLE_LENGTH)
}

pub fn validate_structure_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Structure text must not be empty".to_string(),
        ));
    }
    check_length("Structure text", text, MAX_STRUCTURE_TEXT_LENGTH)
}

//! Style classification and style suggestion calls.
//!
//! Both ask the provider for a JSON reply and run it through the same
//! extract-and-sanitize path used for prompt structures.

use promptsmith_core::extraction::extract_value;
use promptsmith_core::instructions::{classifier_instruction, suggester_instruction};
use promptsmith_core::style::{Classification, StyleOption};
use promptsmith_core::types::Language;
use serde::Deserialize;

use crate::error::{LlmError, LlmResult};
use crate::messages::ChatMessage;
use crate::provider::ChatProvider;

#[derive(Debug, Default, Deserialize)]
struct SuggestionPayload {
    #[serde(default)]
    options: Vec<StyleOption>,
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> LlmResult<T> {
    let value = extract_value(raw).map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| LlmError::MalformedResponse(e.to_string()))
}

/// Ask the classifier which registered style fits `text`.
pub async fn classify_style(
    provider: &dyn ChatProvider,
    api_key: &str,
    text: &str,
) -> LlmResult<Classification> {
    let messages = vec![
        ChatMessage::system(classifier_instruction()),
        ChatMessage::user(text),
    ];
    let raw = provider.complete_json(api_key, messages).await?;
    let verdict: Classification = decode(&raw)?;

    tracing::debug!(
        style = ?verdict.style,
        confidence = verdict.confidence,
        "Style classified",
    );
    Ok(verdict)
}

/// Ask for creative style options for `text`, written in `language`.
/// Options without an id are dropped.
pub async fn suggest_styles(
    provider: &dyn ChatProvider,
    api_key: &str,
    text: &str,
    language: Language,
) -> LlmResult<Vec<StyleOption>> {
    let messages = vec![
        ChatMessage::system(suggester_instruction(language)),
        ChatMessage::user(text),
    ];
    let raw = provider.complete_json(api_key, messages).await?;
    let payload: SuggestionPayload = decode(&raw)?;

    let options: Vec<StyleOption> = payload
        .options
        .into_iter()
        .filter(|o| !o.id.trim().is_empty())
        .collect();
    tracing::debug!(count = options.len(), "Style suggestions received");
    Ok(options)
}

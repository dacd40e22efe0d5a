//! Handlers for deterministic prompt assembly.
//!
//! `assemble` formats a structure the caller already holds; `structure`
//! recovers one from raw completion text first (the buffered output of
//! `/generate`) and then formats it.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use promptsmith_core::assembly::{assemble_with, AssemblyOptions, SdLayout};
use promptsmith_core::extraction::structure_from_completion;
use promptsmith_core::platform::Platform;
use promptsmith_core::sanitize::sanitize_value;
use promptsmith_core::structure::{parse_structure, PromptStructure};
use promptsmith_core::types::Language;
use promptsmith_core::validation::validate_structure_text;

use crate::error::AppResult;
use crate::response::{data, DataJson};

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Request body for `POST /assemble`. `structure` may use either schema
/// version.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleRequest {
    pub structure: Value,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub sd_layout: SdLayout,
}

/// Request body for `POST /structure`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRequest {
    pub text: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub sd_layout: SdLayout,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AssembledPrompt {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct StructuredPrompt {
    pub structure: PromptStructure,
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assemble
pub async fn assemble(
    Json(input): Json<AssembleRequest>,
) -> AppResult<DataJson<AssembledPrompt>> {
    let structure = parse_structure(sanitize_value(input.structure), input.language)?;
    let options = AssemblyOptions {
        sd_layout: input.sd_layout,
    };
    let prompt = assemble_with(&structure, &input.platform, input.language, options);

    tracing::debug!(
        platform = %input.platform,
        prompt_len = prompt.len(),
        "Assembled prompt",
    );
    Ok(data(AssembledPrompt { prompt }))
}

/// POST /api/v1/structure
pub async fn structure_completion(
    Json(input): Json<StructureRequest>,
) -> AppResult<DataJson<StructuredPrompt>> {
    validate_structure_text(&input.text)?;

    let mut structure = structure_from_completion(&input.text, input.language)?;
    let options = AssemblyOptions {
        sd_layout: input.sd_layout,
    };
    let prompt = assemble_with(&structure, &input.platform, input.language, options);
    structure.enriched_prompt = prompt.clone();

    tracing::debug!(
        platform = %input.platform,
        text_len = input.text.len(),
        "Structured completion text",
    );
    Ok(data(StructuredPrompt { structure, prompt }))
}

//! Handler for streamed prompt generation.
//!
//! Resolves a style (pre-selected, custom, or via the classifier), picks
//! the matching system instruction and relays the completion tokens as a
//! plain-text body. When the classifier is unsure, no completion is run and
//! the caller gets the options to choose from instead.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderName;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use promptsmith_core::instructions::{instruction_for, GenerationMode};
use promptsmith_core::style::{ResolvedStyle, StyleOption, StyleRequest, StyleState};
use promptsmith_core::types::Language;
use promptsmith_core::validation::{validate_custom_style, validate_user_input};
use promptsmith_llm::classifier::{classify_style, suggest_styles};
use promptsmith_llm::ChatMessage;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Value of `action` in the style-selection response.
pub const STYLE_SELECTION_REQUIRED: &str = "style_selection_required";

/// Response header carrying the style the instruction was chosen for.
pub const RESOLVED_STYLE_HEADER: &str = "x-resolved-style";

// ---------------------------------------------------------------------------
// API request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate`. Unknown `mode` and `language` values
/// fall back to `quick` and English.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub user_input: String,
    pub mode: Option<String>,
    pub language: Option<String>,
    pub api_key: Option<String>,
    pub style: Option<String>,
    pub custom_style: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StyleSelectionRequired {
    pub action: &'static str,
    pub options: Vec<StyleOption>,
}

enum StyleOutcome {
    Resolved(ResolvedStyle),
    SelectionRequired(Vec<StyleOption>),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drive the style state machine to a resolution or a user prompt.
///
/// Classification failures fall back to the default style; suggestion
/// failures leave only the preset options.
async fn resolve_style(
    state: &AppState,
    api_key: &str,
    input: &GenerateRequest,
    mode: GenerationMode,
    language: Language,
) -> AppResult<StyleOutcome> {
    let mut current = StyleState::start(&StyleRequest {
        preselected: input.style.clone(),
        custom_style: input.custom_style.clone(),
    });

    if current == StyleState::NoStyleChosen {
        // Translation does not depend on the visual style.
        if mode == GenerationMode::Translate {
            return Ok(StyleOutcome::Resolved(ResolvedStyle::general()));
        }

        current = current.begin_classification()?;
        current = match classify_style(state.provider.as_ref(), api_key, &input.user_input).await
        {
            Ok(verdict) => current.on_classification(&verdict)?,
            Err(e) => {
                tracing::warn!(error = %e, "Style classification failed, using default style");
                current.on_classification_failed()?
            }
        };
    }

    if matches!(current, StyleState::AutoResolved { .. }) {
        current = current.proceed()?;
    }

    match current {
        StyleState::Resolved(style) => Ok(StyleOutcome::Resolved(style)),
        awaiting @ StyleState::AwaitingUserChoice { .. } => {
            let suggestions =
                match suggest_styles(state.provider.as_ref(), api_key, &input.user_input, language)
                    .await
                {
                    Ok(options) => options,
                    Err(e) => {
                        tracing::warn!(error = %e, "Style suggestion failed, offering presets only");
                        Vec::new()
                    }
                };
            match awaiting.with_suggestions(suggestions)? {
                StyleState::AwaitingUserChoice { options } => {
                    Ok(StyleOutcome::SelectionRequired(options))
                }
                other => Err(AppError::InternalError(format!(
                    "unexpected style state after suggestions: {}",
                    other.name()
                ))),
            }
        }
        other => Err(AppError::InternalError(format!(
            "style resolution stopped in state {}",
            other.name()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Response> {
    validate_user_input(&input.user_input)?;
    if let Some(custom) = input.custom_style.as_deref() {
        validate_custom_style(custom)?;
    }

    let api_key = state
        .config
        .llm
        .effective_key(input.api_key.as_deref())
        .ok_or(AppError::MissingApiKey)?;

    let mode = input
        .mode
        .as_deref()
        .map(GenerationMode::from_id)
        .unwrap_or_default();
    let language = input
        .language
        .as_deref()
        .map(Language::from_id)
        .unwrap_or_default();

    let style = match resolve_style(&state, &api_key, &input, mode, language).await? {
        StyleOutcome::Resolved(style) => style,
        StyleOutcome::SelectionRequired(options) => {
            tracing::info!(option_count = options.len(), "Style selection required");
            return Ok(Json(StyleSelectionRequired {
                action: STYLE_SELECTION_REQUIRED,
                options,
            })
            .into_response());
        }
    };

    let system = instruction_for(&style.style_id, input.version.as_deref(), mode, language);
    let user = style.apply_hint(&input.user_input);

    tracing::info!(
        style = %style.style_id,
        has_hint = style.hint.is_some(),
        ?mode,
        language = language.as_str(),
        input_len = input.user_input.chars().count(),
        "Starting prompt generation",
    );

    let tokens = state
        .provider
        .stream_chat(&api_key, vec![ChatMessage::system(system), ChatMessage::user(user)])
        .await?;

    let body = Body::from_stream(
        tokens.inspect_err(|e| tracing::error!(error = %e, "Completion stream aborted")),
    );

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (HeaderName::from_static(RESOLVED_STYLE_HEADER), style.style_id),
        ],
        body,
    )
        .into_response())
}

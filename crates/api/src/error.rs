use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use promptsmith_core::error::CoreError;
use promptsmith_llm::LlmError;
use serde_json::json;

/// Message returned for every upstream completion failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch from DeepSeek";

/// Message returned when neither the request nor the server has a key.
pub const MISSING_KEY_MESSAGE: &str =
    "DeepSeek API Key is missing. Please configure it in the settings.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`LlmError`] for completion
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent `{ "error", "code" }` JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `promptsmith_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the completion endpoint.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No API key in the request and none configured on the server.
    #[error("Missing API key")]
    MissingApiKey,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::StructuringFailed(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "STRUCTURING_FAILED",
                    msg.clone(),
                ),
                CoreError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION", core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Completion endpoint errors ---
            AppError::Llm(llm) => classify_llm_error(llm),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "MISSING_API_KEY",
                MISSING_KEY_MESSAGE.to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a completion error into an HTTP status, error code, and message.
///
/// - Upstream non-2xx statuses are passed through unchanged.
/// - Transport failures map to 502.
/// - The upstream body is logged, never returned.
fn classify_llm_error(err: &LlmError) -> (StatusCode, &'static str, String) {
    match err {
        LlmError::Api { status, body } => {
            tracing::error!(status, body = %body, "Completion endpoint rejected request");
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, "UPSTREAM_ERROR", UPSTREAM_FAILURE_MESSAGE.to_string())
        }
        LlmError::Request(e) => {
            tracing::error!(error = %e, "Completion endpoint unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            )
        }
        LlmError::MalformedResponse(msg) | LlmError::Stream(msg) => {
            tracing::error!(error = %msg, "Completion endpoint returned an unusable response");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            )
        }
    }
}

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvCheckResponse {
    pub has_deep_seek_key: bool,
}

/// GET /api/v1/env-check -- whether requests without a key can still run.
pub async fn env_check(State(state): State<AppState>) -> Json<EnvCheckResponse> {
    Json(EnvCheckResponse {
        has_deep_seek_key: state.config.llm.api_key.is_some(),
    })
}

//! Route definitions for prompt generation and assembly.
//!
//! ```text
//! POST /generate     generate               (generation_router)
//! POST /assemble     assemble               (router)
//! POST /structure    structure_completion   (router)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::{assembly, generate};
use crate::state::AppState;

/// Deterministic assembly routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assemble", post(assembly::assemble))
        .route("/structure", post(assembly::structure_completion))
}

/// The streamed generation route. Mounted separately because it carries its
/// own timeout.
pub fn generation_router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate))
}

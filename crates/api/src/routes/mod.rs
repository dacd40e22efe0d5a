pub mod catalog;
pub mod health;
pub mod prompt;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree, minus `/generate`, which
/// [`prompt::generation_router`] mounts with its own timeout.
///
/// Route hierarchy:
///
/// ```text
/// /env-check                  whether a server-side key is configured (GET)
///
/// /assemble                   structure -> platform prompt (POST)
/// /structure                  completion text -> structure + prompt (POST)
///
/// /platforms                  platform table (GET)
/// /styles                     style registry with instruction versions (GET)
/// /templates                  template catalog, ?category= filter (GET)
/// /templates/{id}             single template (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/env-check", get(handlers::env::env_check))
        .merge(prompt::router())
        .merge(catalog::router())
}

//! Route definitions for the read-only reference data.
//!
//! ```text
//! GET /platforms          list_platforms
//! GET /styles             list_styles
//! GET /templates          list_templates
//! GET /templates/{id}     get_template
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/platforms", get(catalog::list_platforms))
        .route("/styles", get(catalog::list_styles))
        .route("/templates", get(catalog::list_templates))
        .route("/templates/{id}", get(catalog::get_template))
}

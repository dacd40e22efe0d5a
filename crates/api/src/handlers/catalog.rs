//! Handlers for the read-only reference data: platforms, styles and the
//! template catalog.

use axum::extract::{Path, Query};
use serde::{Deserialize, Serialize};

use promptsmith_core::catalog::{self, Template, TemplateCategory};
use promptsmith_core::error::CoreError;
use promptsmith_core::instructions::{versions_for, VersionSummary};
use promptsmith_core::platform::{PlatformSpec, PLATFORMS};
use promptsmith_core::style::{StyleSpec, STYLES};

use crate::error::{AppError, AppResult};
use crate::response::{data, DataJson};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TemplateListParams {
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A registered style together with its available instruction versions.
#[derive(Debug, Serialize)]
pub struct StyleListing {
    #[serde(flatten)]
    pub style: StyleSpec,
    pub versions: Vec<VersionSummary>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/platforms
pub async fn list_platforms() -> DataJson<&'static [PlatformSpec]> {
    data(PLATFORMS)
}

/// GET /api/v1/styles
pub async fn list_styles() -> DataJson<Vec<StyleListing>> {
    let items = STYLES
        .iter()
        .map(|style| StyleListing {
            style: *style,
            versions: versions_for(style.id),
        })
        .collect();
    data(items)
}

/// GET /api/v1/templates?category=
///
/// An unknown category is a 400, not an empty list.
pub async fn list_templates(
    Query(params): Query<TemplateListParams>,
) -> AppResult<DataJson<Vec<&'static Template>>> {
    let items = match params.category.as_deref().map(str::trim) {
        None | Some("") => catalog::all_templates().iter().collect(),
        Some(raw) => {
            let category = TemplateCategory::from_id(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown template category '{raw}'")))?;
            catalog::templates_in_category(category)
        }
    };
    Ok(data(items))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    Path(id): Path<String>,
) -> AppResult<DataJson<&'static Template>> {
    let template = catalog::find_template(&id).ok_or(CoreError::NotFound {
        entity: "Template",
        id,
    })?;
    Ok(data(template))
}

//! `{ "data": ... }` envelope for the catalog and assembly endpoints.
//!
//! `/generate` is not wrapped: it streams plain text, or returns a bare
//! style-selection object that clients branch on by its `action` key.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Handler return type for enveloped JSON.
pub type DataJson<T> = Json<DataResponse<T>>;

pub fn data<T: Serialize>(data: T) -> DataJson<T> {
    Json(DataResponse { data })
}

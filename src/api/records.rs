//! Analysis history endpoints

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::db::AnalysisRecord;
use crate::error::{Error, Result};
use crate::AppState;

/// GET /history
///
/// All stored analyses, newest first.
pub async fn get_history(State(state): State<AppState>) -> Result<Json<Vec<AnalysisRecord>>> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}

/// GET /analysis/:id
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnalysisRecord>> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("no analysis with id {id}")))?;
    Ok(Json(record))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: i64,
}

/// DELETE /analysis/:id
///
/// Admin only; credentials are re-verified on every call.
pub async fn delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>> {
    state.admin.require(&headers)?;

    if !state.store.delete(id).await? {
        return Err(Error::NotFound(format!("no analysis with id {id}")));
    }

    info!(id, "Deleted analysis");

    Ok(Json(DeleteResponse { deleted: id }))
}

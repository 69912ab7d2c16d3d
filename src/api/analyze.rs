//! Image analysis endpoint

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::vision::SafeSearchScores;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub safe_search: SafeSearchScores,
    pub db_id: i64,
}

/// POST /analyze
///
/// Reads the uploaded `file` field, classifies it through the vision
/// service, and persists the result. Classification completes before the
/// database write begins, so no connection is held across the outbound
/// call.
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::InvalidInput(format!("unreadable upload: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, image_bytes)) = upload else {
        return Err(Error::InvalidInput("missing file field".to_string()));
    };
    if image_bytes.is_empty() {
        return Err(Error::InvalidInput("empty or unreadable file".to_string()));
    }

    let vision = state.vision.as_ref().ok_or_else(|| {
        Error::ExternalService("vision credentials not configured".to_string())
    })?;

    let scores = vision.classify(&image_bytes).await?;
    let record = state.store.create(&filename, &scores).await?;

    info!(id = record.id, filename = %record.filename, "Stored analysis");

    Ok(Json(AnalyzeResponse {
        safe_search: scores,
        db_id: record.id,
    }))
}

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::{self, Role};
use crate::errors::AppError;
use crate::state::AppState;

// POST /api/uploads  (staff) — multipart form with an `image` field,
// forwarded to the external asset host.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    auth::require(&headers, &state.config, Role::Admin)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("image is empty".to_string()));
        }

        let url = state
            .images
            .upload(&filename, bytes.to_vec())
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        return Ok(Json(serde_json::json!({"url": url})));
    }

    Err(AppError::Validation("image field is required".to_string()))
}

//! Multipart image upload.
//!
//! Stores the file under the configured upload directory with a generated
//! name and answers with the URL the client should put in the event's
//! `image` field. Only image content types are accepted and the body size
//! is capped by configuration.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;
use crate::middleware::CurrentUser;

const ALLOWED_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp", "image/gif"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    image_url: String,
    filename: String,
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

/// POST /upload-image
pub async fn action(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let content_type = field.content_type().unwrap_or("").to_string();
    if !ALLOWED_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Invalid file type: {content_type}"
        )));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > state.upload.max_bytes {
        return Err(AppError::Validation(format!(
            "File too large: limit is {} bytes",
            state.upload.max_bytes
        )));
    }

    let filename = format!("{}.{}", Uuid::new_v4(), extension_for(&content_type));
    let path = std::path::Path::new(&state.upload.dir).join(&filename);

    tokio::fs::create_dir_all(&state.upload.dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

    info!(user_id = %user.user_id, %filename, bytes = data.len(), "image uploaded");

    Ok(Json(UploadResponse {
        success: true,
        image_url: format!("/images/{filename}"),
        filename,
    }))
}

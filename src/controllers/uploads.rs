use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::services::storage::{ImageFile, MAX_IMAGE_BYTES};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploads/images", post(upload_image))
        // запас сверху, чтобы слишком большой файл получил понятное сообщение
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES * 2))
}

fn bad_upload(e: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("Invalid upload: {}", e))
}

// POST /api/uploads/images (multipart, поле `image`)
async fn upload_image(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(bad_upload)?;

        let url = state
            .backend
            .upload_image(
                &user.token,
                ImageFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                },
            )
            .await?;
        return Ok((StatusCode::CREATED, Json(json!({ "url": url }))));
    }

    Err(AppError::Validation("Please select a valid image file".to_string()))
}

// src/handlers/backup.rs

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{common::error::AppError, config::AppState};

// GET /api/backup — download do arquivo (ZIP, ou JSON no caminho degradado)
pub async fn create_backup(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let file = app_state.backup_service.create_backup().await?;
    let headers = [
        (header::CONTENT_TYPE, file.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];
    Ok((headers, file.bytes).into_response())
}

// POST /api/restore — corpo é o arquivo (ZIP ou JSON)
pub async fn restore_backup(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    app_state.backup_service.restore(&body).await?;
    Ok((StatusCode::OK, Json(json!({ "restored": true }))))
}

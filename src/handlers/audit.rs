// src/handlers/audit.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{common::error::AppError, config::AppState};

// GET /api/logs — auditoria, mais recente primeiro
pub async fn list_logs(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.audit_repo.list().await;
    Ok((StatusCode::OK, Json(logs)))
}

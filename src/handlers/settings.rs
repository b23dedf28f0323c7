// src/handlers/settings.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{common::error::AppError, config::AppState, models::settings::AppSettings};

// GET /api/settings
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get().await;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<AppSettings>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.settings_repo.put(payload).await?;
    Ok((StatusCode::OK, Json(updated)))
}

// src/handlers/reports.rs

use axum::{Json, extract::State, http::StatusCode, http::header, response::IntoResponse};

use crate::{common::error::AppError, config::AppState};

pub async fn dashboard(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.report_service.dashboard().await;
    Ok((StatusCode::OK, Json(stats)))
}

pub async fn inventory_csv(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.report_service.inventory_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventario_sentinela.csv\"",
            ),
        ],
        csv,
    ))
}

pub async fn cautelas_csv(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.report_service.cautelas_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"historico_cautelas.csv\"",
            ),
        ],
        csv,
    ))
}

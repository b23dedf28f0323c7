// src/handlers/documents.rs

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};

use crate::{common::error::AppError, config::AppState, models::documents::LivroData};

// POST /api/documents/livro — documento HTML imprimível
pub async fn gerar_livro(
    State(app_state): State<AppState>,
    Json(payload): Json<LivroData>,
) -> Result<impl IntoResponse, AppError> {
    let html = app_state.document_service.build_livro(&payload);
    Ok(Html(html))
}

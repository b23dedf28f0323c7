// src/handlers/materials.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        cautelas::Armorer,
        materials::{MaterialCategory, MaterialStatus},
    },
    services::inventory_service::MaterialDraft,
};

// ---
// Payload: Material (criação e edição usam o mesmo shape)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPayload {
    pub category: MaterialCategory,

    #[validate(length(min = 1, message = "O tipo é obrigatório."))]
    #[serde(rename = "type")]
    pub kind: String,

    #[validate(length(min = 1, message = "O modelo é obrigatório."))]
    pub model: String,

    #[validate(length(min = 1, message = "O número de série é obrigatório."))]
    pub serial_number: String,

    #[serde(default)]
    pub manufacturer: String,

    #[serde(default)]
    pub condition: String,

    pub expiry_date: Option<String>,
    pub quantity: Option<u32>,
    pub status: Option<MaterialStatus>,
    pub notes: Option<String>,

    // Identidade do armeiro em exercício, para atribuição na auditoria
    #[validate(nested)]
    pub armorer: Armorer,
}

impl MaterialPayload {
    fn into_parts(self) -> (MaterialDraft, Armorer) {
        (
            MaterialDraft {
                category: self.category,
                kind: self.kind,
                model: self.model,
                serial_number: self.serial_number,
                manufacturer: self.manufacturer,
                condition: self.condition,
                expiry_date: self.expiry_date,
                quantity: self.quantity,
                status: self.status,
                notes: self.notes,
            },
            self.armorer,
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
    #[validate(nested)]
    pub armorer: Armorer,
}

// ---
// Handlers
// ---
pub async fn list_materials(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state.inventory_service.list().await;
    Ok((StatusCode::OK, Json(materials)))
}

pub async fn create_material(
    State(app_state): State<AppState>,
    Json(payload): Json<MaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (draft, armorer) = payload.into_parts();
    let material = app_state.inventory_service.create(draft, &armorer).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn update_material(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (draft, armorer) = payload.into_parts();
    let material = app_state
        .inventory_service
        .update(&id, draft, &armorer)
        .await?;
    Ok((StatusCode::OK, Json(material)))
}

pub async fn delete_material(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DeletePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    app_state
        .inventory_service
        .delete(&id, &payload.armorer)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

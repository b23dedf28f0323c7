// src/handlers/personnel.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, handlers::materials::DeletePayload,
    models::cautelas::Armorer, services::personnel_service::PersonnelDraft,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub rank: String,

    #[validate(length(min = 1, message = "A matrícula é obrigatória."))]
    pub matricula: String,

    #[serde(default)]
    pub cpf: String,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub area: String,

    #[serde(default)]
    pub phone: String,

    pub photo_url: Option<String>,

    #[serde(default = "ativo_por_padrao")]
    pub active: bool,

    pub notes: Option<String>,

    #[validate(nested)]
    pub armorer: Armorer,
}

fn ativo_por_padrao() -> bool {
    true
}

impl PersonnelPayload {
    fn into_parts(self) -> (PersonnelDraft, Armorer) {
        (
            PersonnelDraft {
                name: self.name,
                rank: self.rank,
                matricula: self.matricula,
                cpf: self.cpf,
                unit: self.unit,
                area: self.area,
                phone: self.phone,
                photo_url: self.photo_url,
                active: self.active,
                notes: self.notes,
            },
            self.armorer,
        )
    }
}

pub async fn list_personnel(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let personnel = app_state.personnel_service.list().await;
    Ok((StatusCode::OK, Json(personnel)))
}

pub async fn create_personnel(
    State(app_state): State<AppState>,
    Json(payload): Json<PersonnelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (draft, armorer) = payload.into_parts();
    let person = app_state.personnel_service.create(draft, &armorer).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn update_personnel(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PersonnelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (draft, armorer) = payload.into_parts();
    let person = app_state
        .personnel_service
        .update(&id, draft, &armorer)
        .await?;
    Ok((StatusCode::OK, Json(person)))
}

pub async fn delete_personnel(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DeletePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    app_state
        .personnel_service
        .delete(&id, &payload.armorer)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

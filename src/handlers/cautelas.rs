// src/handlers/cautelas.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{cautelas::Armorer, materials::MaterialCategory},
    services::cautela_service::CautelaItemDraft,
};

// ---
// Payload: Saída de material (abertura de cautela)
// ---
// Serialize também: a validação de lista do `validator` exige que o
// elemento seja serializável para compor os parâmetros do erro.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItemPayload {
    #[validate(length(min = 1, message = "O material do item é obrigatório."))]
    pub material_id: String,

    // Instantâneo para exibição; sobrevive à exclusão do material
    #[serde(default)]
    pub serial_number: String,

    pub category: MaterialCategory,

    // Quantidade fora da faixa é corrigida para 1 pelo motor, nunca rejeitada
    #[serde(default = "quantidade_padrao")]
    pub quantity: i64,
}

fn quantidade_padrao() -> i64 {
    1
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[validate(length(min = 1, message = "Selecione o policial."))]
    pub personnel_id: String,

    #[validate(
        length(min = 1, message = "A cautela precisa de ao menos um item."),
        nested
    )]
    pub items: Vec<CheckoutItemPayload>,

    #[validate(nested)]
    pub armorer: Armorer,

    pub notes_out: Option<String>,
    pub area: Option<String>,
}

// ---
// Payload: Devolução
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPayload {
    #[validate(nested)]
    pub armorer: Armorer,

    pub notes_in: Option<String>,
}

// ---
// Handlers
// ---
pub async fn list_cautelas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cautelas = app_state.cautelas_repo.list().await;
    Ok((StatusCode::OK, Json(cautelas)))
}

pub async fn checkout(
    State(app_state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let items = payload
        .items
        .into_iter()
        .map(|i| CautelaItemDraft {
            material_id: i.material_id,
            serial_number: i.serial_number,
            category: i.category,
            quantity: i.quantity,
        })
        .collect();

    let cautela = app_state
        .cautela_service
        .checkout(
            &payload.personnel_id,
            items,
            &payload.armorer,
            payload.notes_out,
            payload.area,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cautela)))
}

pub async fn devolver(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReturnPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cautela = app_state
        .cautela_service
        .devolver(&id, &payload.armorer, payload.notes_in)
        .await?;

    Ok((StatusCode::OK, Json(cautela)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_sem_itens_falha_na_validacao() {
        let payload: CheckoutPayload = serde_json::from_value(json!({
            "personnelId": "P1",
            "items": [],
            "armorer": {"id": "A1", "name": "Cb Souza", "matricula": "654321"}
        }))
        .unwrap();

        let err = payload.validate().unwrap_err();
        assert!(err.field_errors().contains_key("items"));
    }

    #[test]
    fn payload_minimo_valida_e_assume_quantidade_um() {
        let payload: CheckoutPayload = serde_json::from_value(json!({
            "personnelId": "P1",
            "items": [{"materialId": "M1", "category": "Armamento"}],
            "armorer": {"id": "A1", "name": "Cb Souza", "matricula": "654321"}
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.items[0].quantity, 1);
        assert_eq!(payload.items[0].serial_number, "");
    }
}

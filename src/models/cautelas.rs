// src/models/cautelas.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::materials::MaterialCategory;

// Máquina de estados binária da cautela: OPEN -> CLOSED, sem retorno.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CautelaStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "CLOSED")]
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CautelaItem {
    pub material_id: String,
    // Redundante, mas evita lookup na exibição e sobrevive à exclusão do material
    pub serial_number: String,
    pub category: MaterialCategory,
    // Relevante para munição/carregadores; nunca menor que 1
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cautela {
    pub id: String,
    pub personnel_id: String,
    pub personnel_name: String,
    pub armorer_id: String,
    pub armorer_name: String,
    // Quem recebeu a devolução (preenchido no fechamento)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armorer_in_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armorer_in_name: Option<String>,
    pub items: Vec<CautelaItem>,
    pub timestamp_out: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_in: Option<DateTime<Utc>>,
    pub status: CautelaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_in: Option<String>,
    // Área de serviço desta cautela específica
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

// Identidade do armeiro em exercício. Fornecida pelo chamador a cada
// operação, nunca guardada pelo núcleo além da desnormalização nos registros.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Armorer {
    #[validate(length(min = 1, message = "A identificação do armeiro é obrigatória."))]
    pub id: String,
    #[validate(length(min = 1, message = "O nome do armeiro é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "A matrícula do armeiro é obrigatória."))]
    pub matricula: String,
}

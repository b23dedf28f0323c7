// src/models/personnel.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: String,
    pub name: String,
    // Posto/Graduação
    pub rank: String,
    pub matricula: String,
    pub cpf: String,
    // Companhia/Batalhão
    pub unit: String,
    // Área de atuação
    pub area: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    // Apenas policiais ativos podem receber novas cautelas
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

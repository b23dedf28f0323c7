// src/models/materials.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// Os valores serializados ficam em português para manter compatibilidade
// com os backups já gerados pelo sistema (formato de arquivo em produção).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialCategory {
    #[serde(rename = "Armamento")]
    Weapon,
    #[serde(rename = "Colete Balístico")]
    Vest,
    #[serde(rename = "Rádio HT")]
    Radio,
    #[serde(rename = "Algemas")]
    Cuffs,
    #[serde(rename = "Munição")]
    Ammo,
    #[serde(rename = "Carregador")]
    Magazine,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 6] = [
        MaterialCategory::Weapon,
        MaterialCategory::Vest,
        MaterialCategory::Radio,
        MaterialCategory::Cuffs,
        MaterialCategory::Ammo,
        MaterialCategory::Magazine,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Weapon => "Armamento",
            MaterialCategory::Vest => "Colete Balístico",
            MaterialCategory::Radio => "Rádio HT",
            MaterialCategory::Cuffs => "Algemas",
            MaterialCategory::Ammo => "Munição",
            MaterialCategory::Magazine => "Carregador",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialStatus {
    #[serde(rename = "Disponível")]
    Available,
    #[serde(rename = "Em Cautela")]
    CheckedOut,
    #[serde(rename = "Manutenção")]
    Maintenance,
    #[serde(rename = "Extraviado")]
    Lost,
    #[serde(rename = "Retido")]
    Retained,
}

impl MaterialStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialStatus::Available => "Disponível",
            MaterialStatus::CheckedOut => "Em Cautela",
            MaterialStatus::Maintenance => "Manutenção",
            MaterialStatus::Lost => "Extraviado",
            MaterialStatus::Retained => "Retido",
        }
    }
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub category: MaterialCategory,
    // "Pistola", "Fuzil"...
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    // "Novo", "Bom", "Regular"
    pub condition: String,
    // Validade (coletes balísticos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    // Nível de estoque (munição); material de instância única é implicitamente 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub status: MaterialStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// src/models/backup.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    audit::SystemLog, cautelas::Cautela, materials::Material, personnel::Personnel,
    settings::AppSettings,
};

// Documento de backup com as cinco coleções. `version` e `materials` são
// obrigatórios na restauração; os demais campos assumem o vazio quando
// ausentes (backups antigos podem não ter todas as chaves).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub materials: Vec<Material>,
    #[serde(default)]
    pub personnel: Vec<Personnel>,
    #[serde(default)]
    pub cautelas: Vec<Cautela>,
    #[serde(default)]
    pub logs: Vec<SystemLog>,
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

pub const BACKUP_VERSION: &str = "1.0";

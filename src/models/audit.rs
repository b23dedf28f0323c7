// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Entrada do log de auditoria (append-only, mais recente primeiro).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: String,
    pub armorer_name: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

// src/models/settings.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub matricula: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub institution_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_logo: Option<String>,
    // "light" | "dark"
    pub theme: String,
    #[serde(default)]
    pub admins: Vec<Admin>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            institution_name: "Polícia Militar".to_string(),
            institution_logo: None,
            theme: "light".to_string(),
            admins: Vec::new(),
        }
    }
}

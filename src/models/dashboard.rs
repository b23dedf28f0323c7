// src/models/dashboard.rs

use serde::Serialize;

use crate::models::materials::{MaterialCategory, MaterialStatus};

// 1. Resumo (os cards do topo)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub open_cautelas: usize,
    pub closed_cautelas: usize,
    pub available_weapons: usize,
    pub total_weapons: usize,
    pub items_in_maintenance: usize,
    pub lost_items: usize,
    pub categories: Vec<CategoryStats>,
    pub status: Vec<StatusCount>,
}

// 2. Distribuição por categoria (gráfico de barras)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: MaterialCategory,
    pub total: usize,
    pub available: usize,
    pub checked_out: usize,
}

// 3. Distribuição por status (gráfico de pizza)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: MaterialStatus,
    pub total: usize,
}

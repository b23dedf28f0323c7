// src/services/report_service.rs

use serde::Serialize;

use crate::{
    common::error::AppError,
    db::{CautelasRepository, MaterialsRepository},
    models::{
        cautelas::CautelaStatus,
        dashboard::{CategoryStats, DashboardStats, StatusCount},
        materials::{MaterialCategory, MaterialStatus},
    },
};

// Linhas das planilhas exportadas. Os cabeçalhos seguem o formato dos
// relatórios já distribuídos pela unidade.
#[derive(Debug, Serialize)]
struct InventoryRow {
    #[serde(rename = "Categoria")]
    categoria: String,
    #[serde(rename = "Tipo")]
    tipo: String,
    #[serde(rename = "Modelo")]
    modelo: String,
    #[serde(rename = "Serial")]
    serial: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Condicao")]
    condicao: String,
}

#[derive(Debug, Serialize)]
struct CautelaRow {
    #[serde(rename = "DataSaida")]
    data_saida: String,
    #[serde(rename = "DataRetorno")]
    data_retorno: String,
    #[serde(rename = "Policial")]
    policial: String,
    #[serde(rename = "Armeiro")]
    armeiro: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "QtdItens")]
    qtd_itens: usize,
}

// Projeções de leitura: planilhas CSV e o resumo do painel. Formatação
// pura, nada aqui alimenta estado de volta.
#[derive(Clone)]
pub struct ReportService {
    materials_repo: MaterialsRepository,
    cautelas_repo: CautelasRepository,
}

impl ReportService {
    pub fn new(materials_repo: MaterialsRepository, cautelas_repo: CautelasRepository) -> Self {
        Self {
            materials_repo,
            cautelas_repo,
        }
    }

    pub async fn inventory_csv(&self) -> Result<String, AppError> {
        let materials = self.materials_repo.list().await;
        let mut writer = csv::Writer::from_writer(vec![]);
        for m in materials {
            writer
                .serialize(InventoryRow {
                    categoria: m.category.to_string(),
                    tipo: m.kind,
                    modelo: m.model,
                    serial: m.serial_number,
                    status: m.status.to_string(),
                    condicao: m.condition,
                })
                .map_err(anyhow::Error::from)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.into()))
    }

    pub async fn cautelas_csv(&self) -> Result<String, AppError> {
        let cautelas = self.cautelas_repo.list().await;
        let mut writer = csv::Writer::from_writer(vec![]);
        for c in cautelas {
            writer
                .serialize(CautelaRow {
                    data_saida: c.timestamp_out.format("%d/%m/%Y %H:%M").to_string(),
                    data_retorno: c
                        .timestamp_in
                        .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                        .unwrap_or_else(|| "Pendente".to_string()),
                    policial: c.personnel_name,
                    armeiro: c.armorer_name,
                    status: match c.status {
                        CautelaStatus::Open => "OPEN".to_string(),
                        CautelaStatus::Closed => "CLOSED".to_string(),
                    },
                    qtd_itens: c.items.len(),
                })
                .map_err(anyhow::Error::from)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::Error::msg(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.into()))
    }

    pub async fn dashboard(&self) -> DashboardStats {
        let materials = self.materials_repo.list().await;
        let cautelas = self.cautelas_repo.list().await;

        let categories = MaterialCategory::ALL
            .iter()
            .map(|&cat| CategoryStats {
                category: cat,
                total: materials.iter().filter(|m| m.category == cat).count(),
                available: materials
                    .iter()
                    .filter(|m| m.category == cat && m.status == MaterialStatus::Available)
                    .count(),
                checked_out: materials
                    .iter()
                    .filter(|m| m.category == cat && m.status == MaterialStatus::CheckedOut)
                    .count(),
            })
            .collect();

        let status = [
            MaterialStatus::Available,
            MaterialStatus::CheckedOut,
            MaterialStatus::Maintenance,
            MaterialStatus::Lost,
            MaterialStatus::Retained,
        ]
        .iter()
        .map(|&s| StatusCount {
            status: s,
            total: materials.iter().filter(|m| m.status == s).count(),
        })
        .filter(|entry| entry.total > 0)
        .collect();

        DashboardStats {
            open_cautelas: cautelas
                .iter()
                .filter(|c| c.status == CautelaStatus::Open)
                .count(),
            closed_cautelas: cautelas
                .iter()
                .filter(|c| c.status == CautelaStatus::Closed)
                .count(),
            available_weapons: materials
                .iter()
                .filter(|m| {
                    m.category == MaterialCategory::Weapon && m.status == MaterialStatus::Available
                })
                .count(),
            total_weapons: materials
                .iter()
                .filter(|m| m.category == MaterialCategory::Weapon)
                .count(),
            items_in_maintenance: materials
                .iter()
                .filter(|m| m.status == MaterialStatus::Maintenance)
                .count(),
            lost_items: materials
                .iter()
                .filter(|m| m.status == MaterialStatus::Lost)
                .count(),
            categories,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::cautelas::{Cautela, CautelaItem};
    use crate::models::materials::Material;
    use chrono::Utc;

    fn material(id: &str, category: MaterialCategory, status: MaterialStatus) -> Material {
        Material {
            id: id.to_string(),
            category,
            kind: "Pistola".to_string(),
            model: "PT 840".to_string(),
            serial_number: format!("SN-{id}"),
            manufacturer: "Taurus".to_string(),
            condition: "Bom".to_string(),
            expiry_date: None,
            quantity: None,
            status,
            notes: None,
        }
    }

    async fn service_com(materials: Vec<Material>) -> (ReportService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let materials_repo = MaterialsRepository::new(store.clone()).unwrap();
        materials_repo.replace_all(materials).await.unwrap();
        let cautelas_repo = CautelasRepository::new(store).unwrap();
        (ReportService::new(materials_repo, cautelas_repo), dir)
    }

    #[tokio::test]
    async fn planilha_de_inventario_tem_cabecalho_e_linhas() {
        let (service, _dir) = service_com(vec![material(
            "M1",
            MaterialCategory::Weapon,
            MaterialStatus::Available,
        )])
        .await;

        let csv = service.inventory_csv().await.unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Categoria,Tipo,Modelo,Serial,Status,Condicao"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Armamento"));
        assert!(row.contains("SN-M1"));
        assert!(row.contains("Disponível"));
    }

    fn cautela_aberta() -> Cautela {
        Cautela {
            id: "C1".to_string(),
            personnel_id: "P1".to_string(),
            personnel_name: "Sd Silva".to_string(),
            armorer_id: "A1".to_string(),
            armorer_name: "Cb Souza".to_string(),
            armorer_in_id: None,
            armorer_in_name: None,
            items: vec![CautelaItem {
                material_id: "M1".to_string(),
                serial_number: "SN-M1".to_string(),
                category: MaterialCategory::Weapon,
                quantity: 1,
            }],
            timestamp_out: Utc::now(),
            timestamp_in: None,
            status: CautelaStatus::Open,
            notes_out: None,
            notes_in: None,
            area: None,
        }
    }

    #[tokio::test]
    async fn planilha_de_cautelas_marca_retorno_pendente() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let materials_repo = MaterialsRepository::new(store.clone()).unwrap();
        let cautelas_repo = CautelasRepository::new(store).unwrap();
        cautelas_repo.replace_all(vec![cautela_aberta()]).await.unwrap();
        let service = ReportService::new(materials_repo, cautelas_repo);

        let csv = service.cautelas_csv().await.unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "DataSaida,DataRetorno,Policial,Armeiro,Status,QtdItens"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Pendente"));
        assert!(row.contains("Sd Silva"));
        assert!(row.contains("Cb Souza"));
        assert!(row.contains("OPEN"));
        assert!(row.ends_with(",1"));
    }

    #[tokio::test]
    async fn painel_conta_por_categoria_e_status() {
        let (service, _dir) = service_com(vec![
            material("M1", MaterialCategory::Weapon, MaterialStatus::Available),
            material("M2", MaterialCategory::Weapon, MaterialStatus::CheckedOut),
            material("M3", MaterialCategory::Vest, MaterialStatus::Maintenance),
        ])
        .await;

        let stats = service.dashboard().await;
        assert_eq!(stats.total_weapons, 2);
        assert_eq!(stats.available_weapons, 1);
        assert_eq!(stats.items_in_maintenance, 1);
        // status zerados ficam fora do gráfico
        assert_eq!(stats.status.len(), 3);
    }
}

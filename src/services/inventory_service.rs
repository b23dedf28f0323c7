// src/services/inventory_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, MaterialsRepository},
    models::{
        cautelas::Armorer,
        materials::{Material, MaterialCategory, MaterialStatus},
    },
};

// Campos editáveis de um material. O id é atribuído aqui na criação.
#[derive(Debug, Clone)]
pub struct MaterialDraft {
    pub category: MaterialCategory,
    pub kind: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub condition: String,
    pub expiry_date: Option<String>,
    pub quantity: Option<u32>,
    pub status: Option<MaterialStatus>,
    pub notes: Option<String>,
}

// Gestão do catálogo de materiais. Mexe em todos os campos; o motor de
// cautela é o único outro ponto que altera `status`. A exclusão não
// confere cautelas abertas (lacuna herdada do fluxo de inventário).
#[derive(Clone)]
pub struct InventoryService {
    materials_repo: MaterialsRepository,
    audit_repo: AuditRepository,
}

impl InventoryService {
    pub fn new(materials_repo: MaterialsRepository, audit_repo: AuditRepository) -> Self {
        Self {
            materials_repo,
            audit_repo,
        }
    }

    pub async fn list(&self) -> Vec<Material> {
        self.materials_repo.list().await
    }

    pub async fn create(
        &self,
        draft: MaterialDraft,
        armorer: &Armorer,
    ) -> Result<Material, AppError> {
        let material = Material {
            id: Uuid::new_v4().to_string(),
            category: draft.category,
            kind: draft.kind,
            model: draft.model,
            serial_number: draft.serial_number,
            manufacturer: draft.manufacturer,
            condition: draft.condition,
            expiry_date: draft.expiry_date,
            quantity: draft.quantity,
            status: draft.status.unwrap_or(MaterialStatus::Available),
            notes: draft.notes,
        };

        let created = self.materials_repo.insert(material).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Novo Material",
                &format!(
                    "Cadastrou {} {} ({})",
                    created.kind, created.model, created.serial_number
                ),
            )
            .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        draft: MaterialDraft,
        armorer: &Armorer,
    ) -> Result<Material, AppError> {
        let current = self
            .materials_repo
            .get(id)
            .await
            .ok_or(AppError::MaterialNotFound)?;

        let material = Material {
            id: current.id,
            category: draft.category,
            kind: draft.kind,
            model: draft.model,
            serial_number: draft.serial_number,
            manufacturer: draft.manufacturer,
            condition: draft.condition,
            expiry_date: draft.expiry_date,
            quantity: draft.quantity,
            status: draft.status.unwrap_or(current.status),
            notes: draft.notes,
        };

        let updated = self.materials_repo.update(material).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Editar Material",
                &format!(
                    "Editou item {} {} ({})",
                    updated.kind, updated.model, updated.serial_number
                ),
            )
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, armorer: &Armorer) -> Result<(), AppError> {
        let removed = self.materials_repo.delete(id).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Excluir Material",
                &format!(
                    "Excluiu {} {} ({})",
                    removed.kind, removed.model, removed.serial_number
                ),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn draft(serial: &str) -> MaterialDraft {
        MaterialDraft {
            category: MaterialCategory::Weapon,
            kind: "Pistola".to_string(),
            model: "PT 840".to_string(),
            serial_number: serial.to_string(),
            manufacturer: "Taurus".to_string(),
            condition: "Novo".to_string(),
            expiry_date: None,
            quantity: None,
            status: None,
            notes: None,
        }
    }

    fn armeiro() -> Armorer {
        Armorer {
            id: "A1".to_string(),
            name: "Cb Souza".to_string(),
            matricula: "654321".to_string(),
        }
    }

    #[tokio::test]
    async fn criacao_assume_status_disponivel_e_audita() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let materials = MaterialsRepository::new(store.clone()).unwrap();
        let audit = AuditRepository::new(store).unwrap();
        let service = InventoryService::new(materials, audit.clone());

        let created = service.create(draft("SN-1"), &armeiro()).await.unwrap();
        assert_eq!(created.status, MaterialStatus::Available);

        let logs = audit.list().await;
        assert_eq!(logs[0].action, "Novo Material");
        assert!(logs[0].details.contains("SN-1"));
    }

    #[tokio::test]
    async fn editar_material_inexistente_e_erro() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let materials = MaterialsRepository::new(store.clone()).unwrap();
        let audit = AuditRepository::new(store).unwrap();
        let service = InventoryService::new(materials, audit);

        let err = service
            .update("nao-existe", draft("SN-1"), &armeiro())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MaterialNotFound));
    }
}

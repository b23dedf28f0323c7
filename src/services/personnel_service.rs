// src/services/personnel_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, PersonnelRepository},
    models::{cautelas::Armorer, personnel::Personnel},
};

#[derive(Debug, Clone)]
pub struct PersonnelDraft {
    pub name: String,
    pub rank: String,
    pub matricula: String,
    pub cpf: String,
    pub unit: String,
    pub area: String,
    pub phone: String,
    pub photo_url: Option<String>,
    pub active: bool,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct PersonnelService {
    personnel_repo: PersonnelRepository,
    audit_repo: AuditRepository,
}

impl PersonnelService {
    pub fn new(personnel_repo: PersonnelRepository, audit_repo: AuditRepository) -> Self {
        Self {
            personnel_repo,
            audit_repo,
        }
    }

    pub async fn list(&self) -> Vec<Personnel> {
        self.personnel_repo.list().await
    }

    pub async fn create(
        &self,
        draft: PersonnelDraft,
        armorer: &Armorer,
    ) -> Result<Personnel, AppError> {
        let person = Personnel {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            rank: draft.rank,
            matricula: draft.matricula,
            cpf: draft.cpf,
            unit: draft.unit,
            area: draft.area,
            phone: draft.phone,
            photo_url: draft.photo_url,
            active: draft.active,
            notes: draft.notes,
        };

        let created = self.personnel_repo.insert(person).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Novo Policial",
                &format!("Cadastrou {} ({})", created.name, created.matricula),
            )
            .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        draft: PersonnelDraft,
        armorer: &Armorer,
    ) -> Result<Personnel, AppError> {
        let current = self
            .personnel_repo
            .get(id)
            .await
            .ok_or(AppError::PersonnelNotFound)?;

        let person = Personnel {
            id: current.id,
            name: draft.name,
            rank: draft.rank,
            matricula: draft.matricula,
            cpf: draft.cpf,
            unit: draft.unit,
            area: draft.area,
            phone: draft.phone,
            photo_url: draft.photo_url,
            active: draft.active,
            notes: draft.notes,
        };

        let updated = self.personnel_repo.update(person).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Editar Policial",
                &format!("Editou dados de {} ({})", updated.name, updated.matricula),
            )
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, armorer: &Armorer) -> Result<(), AppError> {
        let removed = self.personnel_repo.delete(id).await?;
        self.audit_repo
            .append(
                &armorer.name,
                "Excluir Policial",
                &format!("Excluiu {} ({})", removed.name, removed.matricula),
            )
            .await?;
        Ok(())
    }
}

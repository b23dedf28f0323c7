// src/services/backup_service.rs

use std::io::{Cursor, Read, Write};

use chrono::Utc;
use zip::{ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::{
    common::error::AppError,
    db::{
        AuditRepository, CautelasRepository, MaterialsRepository, PersonnelRepository,
        SettingsRepository,
    },
    models::backup::{BACKUP_VERSION, BackupDocument},
};

const BACKUP_ENTRY: &str = "backup_sentinela.json";

// Arquivo pronto para download. Quando a compactação falha, o serviço
// degrada para JSON puro em vez de falhar o backup.
#[derive(Debug)]
pub struct BackupFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct BackupService {
    materials_repo: MaterialsRepository,
    personnel_repo: PersonnelRepository,
    cautelas_repo: CautelasRepository,
    audit_repo: AuditRepository,
    settings_repo: SettingsRepository,
}

impl BackupService {
    pub fn new(
        materials_repo: MaterialsRepository,
        personnel_repo: PersonnelRepository,
        cautelas_repo: CautelasRepository,
        audit_repo: AuditRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self {
            materials_repo,
            personnel_repo,
            cautelas_repo,
            audit_repo,
            settings_repo,
        }
    }

    pub async fn create_backup(&self) -> Result<BackupFile, AppError> {
        let document = BackupDocument {
            materials: self.materials_repo.list().await,
            personnel: self.personnel_repo.list().await,
            cautelas: self.cautelas_repo.list().await,
            logs: self.audit_repo.list().await,
            settings: self.settings_repo.get().await,
            timestamp: Utc::now(),
            version: BACKUP_VERSION.to_string(),
        };
        let json = serde_json::to_vec(&document)?;
        let date = Utc::now().format("%Y-%m-%d");

        match compactar(&json) {
            Ok(bytes) => Ok(BackupFile {
                filename: format!("backup_sentinela_{date}.zip"),
                content_type: "application/zip",
                bytes,
            }),
            Err(e) => {
                // Fallback: exporta o JSON puro se a compactação falhar.
                tracing::warn!("Falha ao compactar o backup, exportando JSON puro: {e}");
                Ok(BackupFile {
                    filename: format!("backup_sentinela_{date}.json"),
                    content_type: "application/json",
                    bytes: json,
                })
            }
        }
    }

    // Aceita ZIP (primeiro membro *.json) ou o documento JSON puro.
    // O documento inteiro é validado antes de tocar qualquer catálogo —
    // restauração nunca é aplicada pela metade.
    pub async fn restore(&self, bytes: &[u8]) -> Result<(), AppError> {
        let json = if bytes.starts_with(b"PK") {
            extrair_json(bytes).ok_or(AppError::InvalidBackup)?
        } else {
            bytes.to_vec()
        };

        let value: serde_json::Value =
            serde_json::from_slice(&json).map_err(|_| AppError::InvalidBackup)?;
        if value.get("version").is_none() || value.get("materials").is_none() {
            return Err(AppError::InvalidBackup);
        }
        let document: BackupDocument =
            serde_json::from_value(value).map_err(|_| AppError::InvalidBackup)?;

        self.materials_repo.replace_all(document.materials).await?;
        self.personnel_repo.replace_all(document.personnel).await?;
        self.cautelas_repo.replace_all(document.cautelas).await?;
        self.audit_repo.replace_all(document.logs).await?;
        self.settings_repo.put(document.settings).await?;
        Ok(())
    }
}

fn compactar(json: &[u8]) -> Result<Vec<u8>, zip::result::ZipError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(BACKUP_ENTRY, SimpleFileOptions::default())?;
    writer.write_all(json)?;
    Ok(writer.finish()?.into_inner())
}

fn extrair_json(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).ok()?;
    let name = (0..archive.len()).find_map(|i| {
        let entry = archive.by_index(i).ok()?;
        let name = entry.name().to_string();
        name.ends_with(".json").then_some(name)
    })?;
    let mut file = archive.by_name(&name).ok()?;
    let mut out = Vec::new();
    file.read_to_end(&mut out).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::materials::{Material, MaterialCategory, MaterialStatus};
    use tempfile::TempDir;

    fn material(id: &str) -> Material {
        Material {
            id: id.to_string(),
            category: MaterialCategory::Weapon,
            kind: "Pistola".to_string(),
            model: "PT 840".to_string(),
            serial_number: format!("SN-{id}"),
            manufacturer: "Taurus".to_string(),
            condition: "Bom".to_string(),
            expiry_date: None,
            quantity: None,
            status: MaterialStatus::Available,
            notes: None,
        }
    }

    fn ambiente() -> (BackupService, MaterialsRepository, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let materials = MaterialsRepository::new(store.clone()).unwrap();
        let service = BackupService::new(
            materials.clone(),
            PersonnelRepository::new(store.clone()).unwrap(),
            CautelasRepository::new(store.clone()).unwrap(),
            AuditRepository::new(store.clone()).unwrap(),
            SettingsRepository::new(store).unwrap(),
        );
        (service, materials, dir)
    }

    #[tokio::test]
    async fn backup_compactado_restaura_em_outro_ambiente() {
        let (origem, materiais_origem, _dir1) = ambiente();
        materiais_origem.replace_all(vec![material("M1")]).await.unwrap();

        let backup = origem.create_backup().await.unwrap();
        assert!(backup.filename.ends_with(".zip"));
        assert!(backup.bytes.starts_with(b"PK"));

        let (destino, materiais_destino, _dir2) = ambiente();
        destino.restore(&backup.bytes).await.unwrap();
        let restaurados = materiais_destino.list().await;
        assert_eq!(restaurados.len(), 1);
        assert_eq!(restaurados[0].serial_number, "SN-M1");
    }

    #[tokio::test]
    async fn restauracao_aceita_json_puro() {
        let (origem, materiais_origem, _dir1) = ambiente();
        materiais_origem.replace_all(vec![material("M1")]).await.unwrap();

        let backup = origem.create_backup().await.unwrap();
        let json = extrair_json(&backup.bytes).unwrap();

        let (destino, materiais_destino, _dir2) = ambiente();
        destino.restore(&json).await.unwrap();
        assert_eq!(materiais_destino.list().await.len(), 1);
    }

    #[tokio::test]
    async fn documento_sem_version_ou_materials_e_rejeitado() {
        let (service, materiais, _dir) = ambiente();
        materiais.replace_all(vec![material("M1")]).await.unwrap();

        let sem_version = br#"{"materials": []}"#;
        assert!(matches!(
            service.restore(sem_version).await.unwrap_err(),
            AppError::InvalidBackup
        ));

        let sem_materials = br#"{"version": "1.0"}"#;
        assert!(matches!(
            service.restore(sem_materials).await.unwrap_err(),
            AppError::InvalidBackup
        ));

        // nada foi aplicado parcialmente
        assert_eq!(materiais.list().await.len(), 1);
    }

    #[tokio::test]
    async fn lixo_binario_e_rejeitado() {
        let (service, _materiais, _dir) = ambiente();
        assert!(matches!(
            service.restore(b"isto nao e um backup").await.unwrap_err(),
            AppError::InvalidBackup
        ));
    }
}

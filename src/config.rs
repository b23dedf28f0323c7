use std::env;

use crate::db::{
    AuditRepository, CautelasRepository, MaterialsRepository, PersonnelRepository,
    SettingsRepository, Store,
};
use crate::services::{
    BackupService, CautelaService, DocumentService, InventoryService, PersonnelService,
    ReportService,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub materials_repo: MaterialsRepository,
    pub personnel_repo: PersonnelRepository,
    pub cautelas_repo: CautelasRepository,
    pub audit_repo: AuditRepository,
    pub settings_repo: SettingsRepository,
    pub cautela_service: CautelaService,
    pub inventory_service: InventoryService,
    pub personnel_service: PersonnelService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
    pub backup_service: BackupService,
}

impl AppState {
    // Carrega as configurações, abre o armazenamento e monta os serviços
    pub fn new() -> anyhow::Result<Self> {
        // .env é opcional; as variáveis têm padrão sensato
        let _ = dotenvy::dotenv();

        let data_dir = env::var("SENTINELA_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let store = Store::new(&data_dir)?;

        let materials_repo = MaterialsRepository::new(store.clone())?;
        let personnel_repo = PersonnelRepository::new(store.clone())?;
        let cautelas_repo = CautelasRepository::new(store.clone())?;
        let audit_repo = AuditRepository::new(store.clone())?;
        let settings_repo = SettingsRepository::new(store)?;

        tracing::info!("✅ Armazenamento carregado de {}", data_dir);

        let cautela_service = CautelaService::new(
            materials_repo.clone(),
            personnel_repo.clone(),
            cautelas_repo.clone(),
            audit_repo.clone(),
        );
        let inventory_service =
            InventoryService::new(materials_repo.clone(), audit_repo.clone());
        let personnel_service =
            PersonnelService::new(personnel_repo.clone(), audit_repo.clone());
        let report_service = ReportService::new(materials_repo.clone(), cautelas_repo.clone());
        let document_service = DocumentService::new();
        let backup_service = BackupService::new(
            materials_repo.clone(),
            personnel_repo.clone(),
            cautelas_repo.clone(),
            audit_repo.clone(),
            settings_repo.clone(),
        );

        Ok(Self {
            materials_repo,
            personnel_repo,
            cautelas_repo,
            audit_repo,
            settings_repo,
            cautela_service,
            inventory_service,
            personnel_service,
            report_service,
            document_service,
            backup_service,
        })
    }

    pub fn bind_addr() -> String {
        env::var("SENTINELA_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
    }
}

pub mod store;
pub use store::Store;
pub mod materials_repo;
pub use materials_repo::MaterialsRepository;
pub mod personnel_repo;
pub use personnel_repo::PersonnelRepository;
pub mod cautelas_repo;
pub use cautelas_repo::CautelasRepository;
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;

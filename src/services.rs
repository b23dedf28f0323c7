pub mod backup_service;
pub use backup_service::BackupService;
pub mod cautela_service;
pub use cautela_service::CautelaService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod personnel_service;
pub use personnel_service::PersonnelService;
pub mod report_service;
pub use report_service::ReportService;

pub mod audit;
pub mod backup;
pub mod cautelas;
pub mod dashboard;
pub mod documents;
pub mod materials;
pub mod personnel;
pub mod settings;

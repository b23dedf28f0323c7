pub mod audit;
pub mod backup;
pub mod cautelas;
pub mod documents;
pub mod materials;
pub mod personnel;
pub mod reports;
pub mod settings;

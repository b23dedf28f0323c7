// src/db/store.rs

use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};

use crate::common::error::AppError;

// Chaves dos documentos persistidos. Cada coleção é um arquivo JSON
// inteiro — sem índices, sem transações, sem migrações. Escritas
// concorrentes de processos distintos são "último grava, vence";
// limitação conhecida deste modelo de sessão única.
pub const KEY_MATERIALS: &str = "sentinela_materials";
pub const KEY_PERSONNEL: &str = "sentinela_personnel";
pub const KEY_CAUTELAS: &str = "sentinela_cautelas";
pub const KEY_LOGS: &str = "sentinela_logs";
pub const KEY_SETTINGS: &str = "sentinela_settings";

#[derive(Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    // Leitura genérica: arquivo ausente vira o valor default informado.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, AppError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(default);
        }
        let bytes = std::fs::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // Escrita genérica: o documento inteiro é reescrito a cada mutação.
    // Grava em arquivo temporário e renomeia, assim uma escrita
    // interrompida nunca trunca a coleção.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(value)?;
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leitura_de_chave_ausente_devolve_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();

        let materiais: Vec<String> = store.load(KEY_MATERIALS, Vec::new()).unwrap();
        assert!(materiais.is_empty());
    }

    #[test]
    fn escrita_e_leitura_preservam_a_colecao() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();

        let dados = vec!["G123".to_string(), "G456".to_string()];
        store.save(KEY_PERSONNEL, &dados).unwrap();

        let lidos: Vec<String> = store.load(KEY_PERSONNEL, Vec::new()).unwrap();
        assert_eq!(lidos, dados);

        // o temporário não pode sobrar no diretório
        assert!(!dir.path().join("sentinela_personnel.json.tmp").exists());
    }
}

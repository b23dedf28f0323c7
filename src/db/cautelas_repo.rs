// src/db/cautelas_repo.rs

use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::{
    common::error::AppError,
    db::store::{KEY_CAUTELAS, Store},
    models::cautelas::Cautela,
};

// Histórico de cautelas, ordenado da mais recente para a mais antiga.
// Cautelas nunca são removidas pelo núcleo.
#[derive(Clone)]
pub struct CautelasRepository {
    store: Store,
    cache: Arc<RwLock<Vec<Cautela>>>,
}

impl CautelasRepository {
    pub fn new(store: Store) -> Result<Self, AppError> {
        let data = store.load(KEY_CAUTELAS, Vec::new())?;
        Ok(Self {
            store,
            cache: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn list(&self) -> Vec<Cautela> {
        self.cache.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Cautela> {
        self.cache.read().await.iter().find(|c| c.id == id).cloned()
    }

    pub async fn lock(&self) -> OwnedRwLockWriteGuard<Vec<Cautela>> {
        self.cache.clone().write_owned().await
    }

    pub fn persist(&self, data: &[Cautela]) -> Result<(), AppError> {
        self.store.save(KEY_CAUTELAS, &data)
    }

    pub async fn replace_all(&self, data: Vec<Cautela>) -> Result<(), AppError> {
        let mut guard = self.lock().await;
        self.persist(&data)?;
        *guard = data;
        Ok(())
    }
}

// src/db/materials_repo.rs

use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::{
    common::error::AppError,
    db::store::{KEY_MATERIALS, Store},
    models::materials::Material,
};

// Catálogo de materiais: cópia em memória com write-through para o Store.
// Toda mutação reescreve o documento inteiro antes de publicar em memória.
#[derive(Clone)]
pub struct MaterialsRepository {
    store: Store,
    cache: Arc<RwLock<Vec<Material>>>,
}

impl MaterialsRepository {
    pub fn new(store: Store) -> Result<Self, AppError> {
        let data = store.load(KEY_MATERIALS, Vec::new())?;
        Ok(Self {
            store,
            cache: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn list(&self) -> Vec<Material> {
        self.cache.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Material> {
        self.cache.read().await.iter().find(|m| m.id == id).cloned()
    }

    // Guard de escrita para mutações que atravessam catálogos (motor de
    // cautela). Ordem de aquisição: materiais antes de cautelas.
    pub async fn lock(&self) -> OwnedRwLockWriteGuard<Vec<Material>> {
        self.cache.clone().write_owned().await
    }

    pub fn persist(&self, data: &[Material]) -> Result<(), AppError> {
        self.store.save(KEY_MATERIALS, &data)
    }

    pub async fn insert(&self, material: Material) -> Result<Material, AppError> {
        let mut guard = self.lock().await;
        let mut updated = guard.clone();
        updated.push(material.clone());
        self.persist(&updated)?;
        *guard = updated;
        Ok(material)
    }

    pub async fn update(&self, material: Material) -> Result<Material, AppError> {
        let mut guard = self.lock().await;
        let idx = guard
            .iter()
            .position(|m| m.id == material.id)
            .ok_or(AppError::MaterialNotFound)?;
        let mut updated = guard.clone();
        updated[idx] = material.clone();
        self.persist(&updated)?;
        *guard = updated;
        Ok(material)
    }

    pub async fn delete(&self, id: &str) -> Result<Material, AppError> {
        let mut guard = self.lock().await;
        let idx = guard
            .iter()
            .position(|m| m.id == id)
            .ok_or(AppError::MaterialNotFound)?;
        let mut updated = guard.clone();
        let removed = updated.remove(idx);
        self.persist(&updated)?;
        *guard = updated;
        Ok(removed)
    }

    pub async fn replace_all(&self, data: Vec<Material>) -> Result<(), AppError> {
        let mut guard = self.lock().await;
        self.persist(&data)?;
        *guard = data;
        Ok(())
    }
}

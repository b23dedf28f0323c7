// src/db/personnel_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::store::{KEY_PERSONNEL, Store},
    models::personnel::Personnel,
};

#[derive(Clone)]
pub struct PersonnelRepository {
    store: Store,
    cache: Arc<RwLock<Vec<Personnel>>>,
}

impl PersonnelRepository {
    pub fn new(store: Store) -> Result<Self, AppError> {
        let data = store.load(KEY_PERSONNEL, Vec::new())?;
        Ok(Self {
            store,
            cache: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn list(&self) -> Vec<Personnel> {
        self.cache.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Personnel> {
        self.cache.read().await.iter().find(|p| p.id == id).cloned()
    }

    fn persist(&self, data: &[Personnel]) -> Result<(), AppError> {
        self.store.save(KEY_PERSONNEL, &data)
    }

    pub async fn insert(&self, person: Personnel) -> Result<Personnel, AppError> {
        let mut guard = self.cache.write().await;
        let mut updated = guard.clone();
        updated.push(person.clone());
        self.persist(&updated)?;
        *guard = updated;
        Ok(person)
    }

    pub async fn update(&self, person: Personnel) -> Result<Personnel, AppError> {
        let mut guard = self.cache.write().await;
        let idx = guard
            .iter()
            .position(|p| p.id == person.id)
            .ok_or(AppError::PersonnelNotFound)?;
        let mut updated = guard.clone();
        updated[idx] = person.clone();
        self.persist(&updated)?;
        *guard = updated;
        Ok(person)
    }

    pub async fn delete(&self, id: &str) -> Result<Personnel, AppError> {
        let mut guard = self.cache.write().await;
        let idx = guard
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::PersonnelNotFound)?;
        let mut updated = guard.clone();
        let removed = updated.remove(idx);
        self.persist(&updated)?;
        *guard = updated;
        Ok(removed)
    }

    pub async fn replace_all(&self, data: Vec<Personnel>) -> Result<(), AppError> {
        let mut guard = self.cache.write().await;
        self.persist(&data)?;
        *guard = data;
        Ok(())
    }
}

// src/db/settings_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::store::{KEY_SETTINGS, Store},
    models::settings::AppSettings,
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: Store,
    cache: Arc<RwLock<AppSettings>>,
}

impl SettingsRepository {
    pub fn new(store: Store) -> Result<Self, AppError> {
        let data = store.load(KEY_SETTINGS, AppSettings::default())?;
        Ok(Self {
            store,
            cache: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn get(&self) -> AppSettings {
        self.cache.read().await.clone()
    }

    pub async fn put(&self, settings: AppSettings) -> Result<AppSettings, AppError> {
        let mut guard = self.cache.write().await;
        self.store.save(KEY_SETTINGS, &settings)?;
        *guard = settings.clone();
        Ok(settings)
    }
}

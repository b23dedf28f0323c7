// src/db/audit_repo.rs

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{KEY_LOGS, Store},
    models::audit::SystemLog,
};

// Log de auditoria append-only. Única observabilidade das transições do
// motor de cautela além do tracing.
#[derive(Clone)]
pub struct AuditRepository {
    store: Store,
    cache: Arc<RwLock<Vec<SystemLog>>>,
}

impl AuditRepository {
    pub fn new(store: Store) -> Result<Self, AppError> {
        let data = store.load(KEY_LOGS, Vec::new())?;
        Ok(Self {
            store,
            cache: Arc::new(RwLock::new(data)),
        })
    }

    pub async fn list(&self) -> Vec<SystemLog> {
        self.cache.read().await.clone()
    }

    // Registra uma entrada atribuída ao armeiro em exercício, no topo da lista.
    pub async fn append(
        &self,
        armorer_name: &str,
        action: &str,
        details: &str,
    ) -> Result<SystemLog, AppError> {
        let entry = SystemLog {
            id: Uuid::new_v4().to_string(),
            armorer_name: armorer_name.to_string(),
            action: action.to_string(),
            details: details.to_string(),
            timestamp: Utc::now(),
        };

        let mut guard = self.cache.write().await;
        let mut updated = guard.clone();
        updated.insert(0, entry.clone());
        self.store.save(KEY_LOGS, &updated)?;
        *guard = updated;
        Ok(entry)
    }

    pub async fn replace_all(&self, data: Vec<SystemLog>) -> Result<(), AppError> {
        let mut guard = self.cache.write().await;
        self.store.save(KEY_LOGS, &data)?;
        *guard = data;
        Ok(())
    }
}

//! In-memory request store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    error::StoreError,
    models::SavedRequest,
    repository::{normalize_name, RequestStore},
};
use crate::protocol::RequestDescriptor;

/// Store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    requests: RwLock<Vec<SavedRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn create(
        &self,
        name: &str,
        request: RequestDescriptor,
    ) -> Result<SavedRequest, StoreError> {
        let saved = SavedRequest::new(normalize_name(name)?, request);
        self.requests.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<SavedRequest>, StoreError> {
        Ok(self.requests.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<SavedRequest>, StoreError> {
        Ok(self.requests.read().await.iter().find(|saved| saved.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|saved| saved.id != id);
        Ok(requests.len() != before)
    }
}

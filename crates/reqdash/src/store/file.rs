//! JSON file request store.
//!
//! The whole collection is kept in memory and the file is rewritten after
//! every change. Writes go to a sibling temp file first and are renamed into
//! place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    error::StoreError,
    models::SavedRequest,
    repository::{normalize_name, RequestStore},
};
use crate::protocol::RequestDescriptor;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    requests: RwLock<Vec<SavedRequest>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first change.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let requests = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => return Err(error.into()),
        };

        info!("Opened request store at {} ({} saved)", path.display(), requests.len());
        Ok(Self { path, requests: RwLock::new(requests) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, requests: &[SavedRequest]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(requests)?).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Wrote {} saved requests to {}", requests.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl RequestStore for FileStore {
    async fn create(
        &self,
        name: &str,
        request: RequestDescriptor,
    ) -> Result<SavedRequest, StoreError> {
        let saved = SavedRequest::new(normalize_name(name)?, request);

        let mut requests = self.requests.write().await;
        requests.push(saved.clone());
        if let Err(error) = self.persist(&requests).await {
            requests.pop();
            return Err(error);
        }

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
        let Some(index) = requests.iter().position(|saved| saved.id == id) else {
            return Ok(false);
        };

        let removed = requests.remove(index);
        if let Err(error) = self.persist(&requests).await {
            requests.insert(index, removed);
            return Err(error);
        }

        Ok(true)
    }
}

//! Saved-request repository.
//!
//! The parser and relay never touch this; it is the persistence seam the
//! server (or any other front end) uses to keep named descriptors around.

use async_trait::async_trait;
use uuid::Uuid;

use super::{error::StoreError, models::SavedRequest};
use crate::protocol::RequestDescriptor;

/// Storage abstraction for saved requests
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Save a descriptor under `name`
    async fn create(
        &self,
        name: &str,
        request: RequestDescriptor,
    ) -> Result<SavedRequest, StoreError>;

    /// All saved requests, oldest first
    async fn list(&self) -> Result<Vec<SavedRequest>, StoreError>;

    /// Get a saved request by id
    async fn get(&self, id: Uuid) -> Result<Option<SavedRequest>, StoreError>;

    /// Delete a saved request; returns whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Trimmed name, or an error when nothing is left
pub(crate) fn normalize_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name.to_string())
}

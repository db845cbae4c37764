//! Saved request model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::protocol::RequestDescriptor;

/// A request descriptor stored under a user-chosen name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequest {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub request: RequestDescriptor,
}

impl SavedRequest {
    /// Create a new saved request with a fresh id
    pub fn new(name: String, request: RequestDescriptor) -> Self {
        Self { id: Uuid::new_v4(), name, created_at: Utc::now(), request }
    }
}

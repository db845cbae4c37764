use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request name cannot be empty")]
    EmptyName,

    #[error("Store file error: {0}")]
    Io(#[from] io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

//! Saved-request storage for reqdash.

pub mod error;
pub mod file;
pub mod memory;
pub mod models;
pub mod repository;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::SavedRequest;
pub use repository::RequestStore;

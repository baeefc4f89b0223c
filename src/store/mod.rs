//! Append-only storage for generated content.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ContentType, GeneratedContentRecord, NewContent};

mod memory;
mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Records are never updated or deleted; ids are unique and strictly
/// increasing in insertion order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create(&self, content: NewContent) -> Result<GeneratedContentRecord, StoreError>;

    /// All records of a session in insertion order.
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<GeneratedContentRecord>, StoreError>;

    async fn list_by_session_and_type(
        &self,
        session_id: &str,
        content_type: ContentType,
    ) -> Result<Vec<GeneratedContentRecord>, StoreError>;
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{ContentStore, StoreError};
use crate::models::{ContentType, GeneratedContentRecord, NewContent};

/// In-process store. Id allocation, timestamping and append happen under one
/// write guard, so concurrent creates never share an id.
#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<GeneratedContentRecord>,
    last_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemStore {
    async fn create(&self, content: NewContent) -> Result<GeneratedContentRecord, StoreError> {
        let mut guard = self.inner.write();
        guard.last_id += 1;
        // Wall clock can step backwards; keep created_at monotone with id.
        let now = Utc::now();
        let created_at = match guard.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        guard.last_created_at = Some(created_at);

        let record = GeneratedContentRecord {
            id: guard.last_id,
            session_id: content.session_id,
            content_type: content.content_type,
            niche: content.niche,
            country: content.country,
            language: content.language,
            content: content.content,
            created_at,
        };
        guard.records.push(record.clone());
        Ok(record)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<GeneratedContentRecord>, StoreError> {
        Ok(self.inner.read().records.iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn list_by_session_and_type(
        &self,
        session_id: &str,
        content_type: ContentType,
    ) -> Result<Vec<GeneratedContentRecord>, StoreError> {
        Ok(self.inner.read().records.iter()
            .filter(|r| r.session_id == session_id && r.content_type == content_type)
            .cloned()
            .collect())
    }
}

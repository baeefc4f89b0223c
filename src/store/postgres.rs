use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{ContentStore, StoreError};
use crate::models::{ContentType, GeneratedContentRecord, Language, NewContent};

const COLUMNS: &str = "id, session_id, type, niche, country, language, content, created_at";

/// Durable store on a single `generated_content` table; ids come from
/// `BIGSERIAL`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i64,
    session_id: String,
    #[sqlx(rename = "type")]
    content_type: String,
    niche: String,
    country: String,
    language: String,
    content: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for GeneratedContentRecord {
    type Error = StoreError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let content_type = row.content_type.parse::<ContentType>()
            .map_err(|e| StoreError::Corrupt(format!("row {}: {}", row.id, e)))?;
        let language = row.language.parse::<Language>()
            .map_err(|e| StoreError::Corrupt(format!("row {}: {}", row.id, e)))?;
        Ok(GeneratedContentRecord {
            id: row.id,
            session_id: row.session_id,
            content_type,
            niche: row.niche,
            country: row.country,
            language,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

fn into_records(rows: Vec<ContentRow>) -> Result<Vec<GeneratedContentRecord>, StoreError> {
    rows.into_iter().map(GeneratedContentRecord::try_from).collect()
}

#[async_trait]
impl ContentStore for PgStore {
    async fn create(&self, content: NewContent) -> Result<GeneratedContentRecord, StoreError> {
        let query = format!(
            "INSERT INTO generated_content (session_id, type, niche, country, language, content)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentRow>(&query)
            .bind(&content.session_id)
            .bind(content.content_type.as_str())
            .bind(&content.niche)
            .bind(&content.country)
            .bind(content.language.as_str())
            .bind(&content.content)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<GeneratedContentRecord>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM generated_content WHERE session_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, ContentRow>(&query)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn list_by_session_and_type(
        &self,
        session_id: &str,
        content_type: ContentType,
    ) -> Result<Vec<GeneratedContentRecord>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_content WHERE session_id = $1 AND type = $2 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, ContentRow>(&query)
            .bind(session_id)
            .bind(content_type.as_str())
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(content_type: &str, language: &str) -> ContentRow {
        ContentRow {
            id: 3,
            session_id: "s".into(),
            content_type: content_type.into(),
            niche: "n".into(),
            country: "Germany".into(),
            language: language.into(),
            content: json!({"ideas": []}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_record() {
        let record = GeneratedContentRecord::try_from(row("idea", "pt")).unwrap();
        assert_eq!(record.content_type, ContentType::Idea);
        assert_eq!(record.language, Language::Pt);
        assert_eq!(record.id, 3);
    }

    #[test]
    fn unknown_type_or_language_is_corrupt() {
        assert!(matches!(GeneratedContentRecord::try_from(row("ideas", "en")), Err(StoreError::Corrupt(_))));
        assert!(matches!(GeneratedContentRecord::try_from(row("idea", "fr")), Err(StoreError::Corrupt(_))));
    }
}

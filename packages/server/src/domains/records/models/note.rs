use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{NoteId, RecordId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: NoteId,
    pub record_id: RecordId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub async fn create(
        record_id: RecordId,
        user_id: UserId,
        content: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notes (record_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn list_for_record(
        record_id: RecordId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notes WHERE record_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(record_id)
        .fetch_all(pool)
        .await
    }
}

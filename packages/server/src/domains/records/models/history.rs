use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{HistoryId, RecordId, UserId};

/// Action labels written to the history trail, as surfaced to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Creation,
    Modification,
    Resend,
    Attachment,
    NoteAdded,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "CREACIÓN",
            Self::Modification => "MODIFICACIÓN",
            Self::Resend => "REENVÍO",
            Self::Attachment => "ADJUNTO",
            Self::NoteAdded => "NOTA AGREGADA",
        }
    }
}

/// One immutable line of a record's audit trail. Rows are only ever
/// inserted, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecordHistory {
    pub id: HistoryId,
    pub record_id: RecordId,
    pub action: String,
    pub details: Option<String>,
    pub user_id: Option<UserId>,
    pub timestamp: DateTime<Utc>,
}

impl RecordHistory {
    /// Append a history line inside the same transaction as the mutation it
    /// describes, so neither commits without the other.
    pub async fn append(
        record_id: RecordId,
        action: HistoryAction,
        details: impl Into<String>,
        user_id: Option<UserId>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO record_history (record_id, action, details, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(action.as_str())
        .bind(details.into())
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Full trail for a record, newest first. Ties on timestamp break by
    /// insertion order.
    pub async fn list_for_record(
        record_id: RecordId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM record_history
            WHERE record_id = $1
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(record_id)
        .fetch_all(pool)
        .await
    }
}

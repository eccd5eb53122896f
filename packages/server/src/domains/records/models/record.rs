use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{DepartmentId, RecordId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: RecordId,
    pub sequence_number: i64,
    pub digital_number: String,
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub attachment_filename: Option<String>,
    pub generated_doc_filename: Option<String>,
    pub status: String,
    pub department_id: DepartmentId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for a new record row.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub sequence_number: i64,
    pub digital_number: String,
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub attachment_filename: Option<String>,
    pub status: String,
    pub department_id: DepartmentId,
    pub created_by: UserId,
}

/// Filters for the record listing.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub department_id: Option<DepartmentId>,
    pub status: Option<String>,
    /// Free-text search over digital number, applicant, description, and
    /// department name.
    pub search: Option<String>,
}

impl Record {
    pub async fn insert(new: NewRecord, tx: &mut Transaction<'_, Postgres>) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO records (
                sequence_number, digital_number, full_name, dni, address, phone,
                email, transaction_date, description, attachment_filename,
                status, department_id, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(new.sequence_number)
        .bind(&new.digital_number)
        .bind(&new.full_name)
        .bind(&new.dni)
        .bind(&new.address)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(new.transaction_date)
        .bind(&new.description)
        .bind(&new.attachment_filename)
        .bind(&new.status)
        .bind(new.department_id)
        .bind(new.created_by)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(id: RecordId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM records WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply the field changes of a direct edit.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply_edit(
        id: RecordId,
        full_name: &str,
        dni: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        description: Option<&str>,
        transaction_date: Option<DateTime<Utc>>,
        department_id: DepartmentId,
        digital_number: &str,
        status: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE records
            SET full_name = $2,
                dni = $3,
                address = $4,
                phone = $5,
                email = $6,
                description = $7,
                transaction_date = $8,
                department_id = $9,
                digital_number = $10,
                status = $11,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(dni)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(description)
        .bind(transaction_date)
        .bind(department_id)
        .bind(digital_number)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    /// Apply a transfer: destination department, new number, new status.
    pub async fn apply_transfer(
        id: RecordId,
        department_id: DepartmentId,
        digital_number: &str,
        status: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE records
            SET department_id = $2,
                digital_number = $3,
                status = $4,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(department_id)
        .bind(digital_number)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn set_attachment(
        id: RecordId,
        filename: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE records SET attachment_filename = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(filename)
        .fetch_one(&mut **tx)
        .await
    }

    /// Persist the renderer's artifact name after regeneration.
    pub async fn set_generated_doc(
        id: RecordId,
        filename: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE records SET generated_doc_filename = $2 WHERE id = $1")
            .bind(id)
            .bind(filename)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// List records matching `filter`, newest first.
    pub async fn list(filter: &RecordFilter, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        sqlx::query_as::<_, Self>(
            r#"
            SELECT r.*
            FROM records r
            JOIN departments d ON d.id = r.department_id
            WHERE ($1::bigint IS NULL OR r.department_id = $1)
              AND ($2::text IS NULL OR r.status = $2)
              AND ($3::text IS NULL OR (
                    r.digital_number ILIKE $3
                    OR r.full_name ILIKE $3
                    OR r.description ILIKE $3
                    OR d.name ILIKE $3
              ))
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(filter.department_id)
        .bind(&filter.status)
        .bind(pattern)
        .fetch_all(pool)
        .await
    }
}

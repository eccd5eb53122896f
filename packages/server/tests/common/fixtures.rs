//! Test fixtures for creating test data.
//!
//! Fixtures go through the model methods directly; workflow behavior is
//! exercised through the domain actions in the tests themselves.

use anyhow::Result;
use sqlx::PgPool;

use expedientes_core::common::{Actor, DepartmentId};
use expedientes_core::domains::auth::password::hash_password;
use expedientes_core::domains::departments::Department;
use expedientes_core::domains::records::actions::{create_record, CreateRecordInput};
use expedientes_core::domains::records::Record;
use expedientes_core::domains::users::User;
use expedientes_core::kernel::ServerDeps;

/// Create a user row and return the matching actor.
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    role: &str,
    department: &str,
) -> Result<Actor> {
    let hash = hash_password("secreto123")?;
    let user = User::create(username, &hash, None, role, Some(department), pool).await?;
    Ok(Actor {
        id: user.id,
        username: user.username,
        role: user.role,
        department: department.to_string(),
    })
}

/// The distinguished superuser, admin of Administración.
pub async fn create_superuser(pool: &PgPool) -> Result<Actor> {
    create_test_user(pool, "admin", "admin", "Administración").await
}

/// Look up a seeded department by name.
pub async fn department_named(pool: &PgPool, name: &str) -> Result<Department> {
    Department::find_by_name(name, pool)
        .await?
        .ok_or_else(|| anyhow::anyhow!("department {name} not seeded"))
}

/// Open a record through the real creation action.
pub async fn create_test_record(
    actor: &Actor,
    department_id: DepartmentId,
    full_name: &str,
    manual_sequence: Option<&str>,
    deps: &ServerDeps,
) -> Result<Record> {
    let outcome = create_record(
        actor,
        CreateRecordInput {
            full_name: full_name.to_string(),
            dni: Some("12345678".to_string()),
            address: None,
            phone: None,
            email: None,
            transaction_date: None,
            description: Some("Trámite de prueba".to_string()),
            manual_sequence: manual_sequence.map(str::to_string),
            status: None,
            department_id,
        },
        deps,
    )
    .await?;
    Ok(outcome.record)
}

/// Pin a record's digital number, bypassing the workflow.
pub async fn force_digital_number(pool: &PgPool, record: &Record, number: &str) -> Result<()> {
    sqlx::query("UPDATE records SET digital_number = $2 WHERE id = $1")
        .bind(record.id)
        .bind(number)
        .execute(pool)
        .await?;
    Ok(())
}

/// Pin a record's status, bypassing the workflow.
pub async fn force_status(pool: &PgPool, record: &Record, status: &str) -> Result<()> {
    sqlx::query("UPDATE records SET status = $2 WHERE id = $1")
        .bind(record.id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(())
}

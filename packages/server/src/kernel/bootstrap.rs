//! First-run seeding.
//!
//! Departments are seeded by migrations; the superuser account is created
//! here because its password hash is computed at runtime.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::auth::SUPERUSER_USERNAME;
use crate::domains::auth::password::hash_password;
use crate::domains::users::models::User;

/// Ensure the built-in superuser exists. Idempotent.
pub async fn ensure_superuser(pool: &PgPool) -> Result<()> {
    if User::find_by_username(SUPERUSER_USERNAME, pool).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password("admin")?;
    User::create(
        SUPERUSER_USERNAME,
        &hash,
        Some("Administrador"),
        "admin",
        Some("Administración"),
        pool,
    )
    .await?;
    info!(username = SUPERUSER_USERNAME, "superuser account created");
    Ok(())
}

//! Admin-only user management.

use serde::Deserialize;
use sqlx::PgPool;

use crate::common::auth::SUPERUSER_USERNAME;
use crate::common::{Actor, RecordError, UserId};
use crate::domains::auth::password;
use crate::domains::users::User;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub role: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserInput {
    pub username: String,
    pub name: Option<String>,
    pub role: String,
    pub department: Option<String>,
    /// When set, the password is replaced.
    pub password: Option<String>,
}

fn require_admin(actor: &Actor) -> Result<(), RecordError> {
    if !actor.is_admin() {
        return Err(RecordError::authorization(
            "Solo los administradores pueden gestionar usuarios.",
        ));
    }
    Ok(())
}

pub async fn create_user(
    actor: &Actor,
    input: CreateUserInput,
    pool: &PgPool,
) -> Result<User, RecordError> {
    require_admin(actor)?;

    if User::find_by_username(&input.username, pool).await?.is_some() {
        return Err(RecordError::conflict("El nombre de usuario ya existe."));
    }

    let hash = password::hash_password(&input.password)
        .map_err(|e| RecordError::validation(format!("No se pudo procesar la contraseña: {e}")))?;

    Ok(User::create(
        &input.username,
        &hash,
        input.name.as_deref(),
        &input.role,
        input.department.as_deref(),
        pool,
    )
    .await?)
}

pub async fn update_user(
    actor: &Actor,
    user_id: UserId,
    input: UpdateUserInput,
    pool: &PgPool,
) -> Result<User, RecordError> {
    require_admin(actor)?;

    let existing = User::find_by_id(user_id, pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Usuario no encontrado."))?;

    // The superuser's role is fixed.
    let role = if existing.username == SUPERUSER_USERNAME {
        existing.role.clone()
    } else {
        input.role.clone()
    };

    let hash = match input.password.as_deref() {
        Some(p) if !p.is_empty() => Some(
            password::hash_password(p).map_err(|e| {
                RecordError::validation(format!("No se pudo procesar la contraseña: {e}"))
            })?,
        ),
        _ => None,
    };

    Ok(User::update(
        user_id,
        &input.username,
        input.name.as_deref(),
        &role,
        input.department.as_deref(),
        hash.as_deref(),
        pool,
    )
    .await?)
}

pub async fn delete_user(actor: &Actor, user_id: UserId, pool: &PgPool) -> Result<(), RecordError> {
    require_admin(actor)?;

    let existing = User::find_by_id(user_id, pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Usuario no encontrado."))?;

    if existing.username == SUPERUSER_USERNAME {
        return Err(RecordError::authorization(
            "No puedes eliminar al usuario administrador principal.",
        ));
    }

    User::delete(user_id, pool).await?;
    Ok(())
}

pub async fn list_users(actor: &Actor, pool: &PgPool) -> Result<Vec<User>, RecordError> {
    require_admin(actor)?;
    Ok(User::list_all(pool).await?)
}

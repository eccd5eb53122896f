use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::RecordError;
use crate::domains::users::User;

use super::password::verify_password;
use super::JwtService;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
    pub role: String,
    pub department: Option<String>,
}

/// Verify credentials and issue a JWT.
///
/// The same message is returned for an unknown username and a wrong
/// password.
pub async fn login(
    input: LoginInput,
    jwt: &JwtService,
    pool: &PgPool,
) -> Result<LoginResponse, RecordError> {
    let user = User::find_by_username(&input.username, pool).await?;

    let user = match user {
        Some(u) if verify_password(&input.password, &u.password_hash) => u,
        _ => {
            return Err(RecordError::authorization(
                "Usuario o contraseña incorrectos",
            ))
        }
    };

    let token = jwt.create_token(
        user.id,
        &user.username,
        &user.role,
        user.department.as_deref().unwrap_or(""),
    )?;

    Ok(LoginResponse {
        token,
        username: user.username,
        name: user.name,
        role: user.role,
        department: user.department,
    })
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::common::UserId;
use crate::domains::users::actions::{
    create_user, delete_user, list_users, update_user, CreateUserInput, UpdateUserInput,
};
use crate::domains::users::User;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::ApiResult;

pub async fn list_users_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<Vec<User>>> {
    let users = list_users(&actor, &state.deps.db_pool).await?;
    Ok(Json(users))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(input): Json<CreateUserInput>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = create_user(&actor, input, &state.deps.db_pool).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUserInput>,
) -> ApiResult<Json<User>> {
    let user = update_user(&actor, UserId::from_i64(id), input, &state.deps.db_pool).await?;
    Ok(Json(user))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    delete_user(&actor, UserId::from_i64(id), &state.deps.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

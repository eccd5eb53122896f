use axum::{extract::State, response::Json};

use crate::domains::auth::{login, LoginInput, LoginResponse};
use crate::server::app::AppState;

use super::ApiResult;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> ApiResult<Json<LoginResponse>> {
    let response = login(input, &state.deps.jwt_service, &state.deps.db_pool).await?;
    Ok(Json(response))
}

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::domains::departments::Department;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::ApiResult;

#[derive(Serialize)]
pub struct DepartmentResponse {
    #[serde(flatten)]
    pub department: Department,
    pub code: String,
}

pub async fn list_departments_handler(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = Department::list_all(&state.deps.db_pool)
        .await
        .map_err(crate::common::RecordError::from)?;
    let response = departments
        .into_iter()
        .map(|d| DepartmentResponse {
            code: d.code(),
            department: d,
        })
        .collect();
    Ok(Json(response))
}

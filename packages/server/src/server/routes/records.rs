use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::common::{DepartmentId, RecordError, RecordId};
use crate::domains::records::actions::{
    add_note, attach_file, create_record, edit_record, get_record, list_records, record_history,
    record_notes, transfer_record, CreateRecordInput, EditRecordInput,
};
use crate::domains::records::models::{Note, Record, RecordFilter, RecordHistory};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::{ApiError, ApiResult};

// =============================================================================
// Request / response shapes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListRecordsQuery {
    pub department_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordBody {
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub transaction_date: Option<String>,
    pub description: Option<String>,
    pub manual_sequence: Option<String>,
    pub status: Option<String>,
    pub department_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EditRecordBody {
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub transaction_date: Option<String>,
    pub description: Option<String>,
    pub department_id: i64,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferBody {
    pub department_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NoteBody {
    pub content: String,
}

#[derive(Serialize)]
pub struct RecordResponse {
    pub record: Record,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct RecordDetailResponse {
    pub record: Record,
    pub department_name: String,
    pub department_code: String,
}

#[derive(Serialize)]
pub struct TransferResponse {
    pub record: Record,
    pub transferred: bool,
    pub message: Option<String>,
    pub warnings: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn list_records_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Query(query): Query<ListRecordsQuery>,
) -> ApiResult<Json<Vec<Record>>> {
    let filter = RecordFilter {
        department_id: query.department_id.map(DepartmentId::from_i64),
        status: query.status,
        search: query.search,
    };
    let records = list_records(&actor, filter, &state.deps).await?;
    Ok(Json(records))
}

pub async fn create_record_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(body): Json<CreateRecordBody>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let input = CreateRecordInput {
        full_name: body.full_name,
        dni: body.dni,
        address: body.address,
        phone: body.phone,
        email: body.email,
        transaction_date: body.transaction_date,
        description: body.description,
        manual_sequence: body.manual_sequence,
        status: body.status,
        department_id: DepartmentId::from_i64(body.department_id),
    };
    let outcome = create_record(&actor, input, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            record: outcome.record,
            warnings: outcome.warnings,
        }),
    ))
}

pub async fn get_record_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecordDetailResponse>> {
    let (record, department) = get_record(&actor, RecordId::from_i64(id), &state.deps).await?;
    Ok(Json(RecordDetailResponse {
        record,
        department_code: department.code(),
        department_name: department.name,
    }))
}

pub async fn update_record_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<EditRecordBody>,
) -> ApiResult<Json<RecordResponse>> {
    let input = EditRecordInput {
        full_name: body.full_name,
        dni: body.dni,
        address: body.address,
        phone: body.phone,
        email: body.email,
        transaction_date: body.transaction_date,
        description: body.description,
        department_id: DepartmentId::from_i64(body.department_id),
        status: body.status,
    };
    let outcome = edit_record(&actor, RecordId::from_i64(id), input, &state.deps).await?;
    Ok(Json(RecordResponse {
        record: outcome.record,
        warnings: outcome.warnings,
    }))
}

pub async fn transfer_record_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<TransferBody>,
) -> ApiResult<Json<TransferResponse>> {
    let outcome = transfer_record(
        &actor,
        RecordId::from_i64(id),
        DepartmentId::from_i64(body.department_id),
        &state.deps,
    )
    .await?;
    Ok(Json(TransferResponse {
        record: outcome.record,
        transferred: outcome.transferred,
        message: outcome.message,
        warnings: outcome.warnings,
    }))
}

pub async fn attach_file_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> ApiResult<Json<RecordResponse>> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RecordError::validation(format!("Formulario inválido: {e}")))?
    {
        if let Some(filename) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| RecordError::validation(format!("No se pudo leer el archivo: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| RecordError::validation("No se envió ningún archivo."))?;

    let outcome = attach_file(&actor, RecordId::from_i64(id), &filename, &bytes, &state.deps).await?;
    Ok(Json(RecordResponse {
        record: outcome.record,
        warnings: outcome.warnings,
    }))
}

pub async fn record_history_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<RecordHistory>>> {
    let history = record_history(&actor, RecordId::from_i64(id), &state.deps).await?;
    Ok(Json(history))
}

pub async fn list_notes_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = record_notes(&actor, RecordId::from_i64(id), &state.deps).await?;
    Ok(Json(notes))
}

pub async fn add_note_handler(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<NoteBody>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = add_note(&actor, RecordId::from_i64(id), &body.content, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Serve a stored attachment back to an authenticated user.
pub async fn download_attachment_handler(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    // Names are generated server-side; refuse anything path-like.
    if filename.contains('/') || filename.contains("..") {
        return Err(RecordError::validation("Nombre de archivo inválido.").into());
    }
    let bytes = state
        .deps
        .files
        .load(&filename)
        .await
        .map_err(RecordError::from)?
        .ok_or_else(|| RecordError::not_found("Archivo no encontrado."))?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    )
        .into_response())
}

use chrono::Utc;
use tracing::info;

use crate::common::{is_unique_violation, Actor, DepartmentId, RecordError};
use crate::domains::departments::Department;
use crate::domains::records::models::{HistoryAction, NewRecord, Record, RecordHistory};
use crate::domains::records::numbering::{
    digital_number, next_available_sequence, parse_manual_sequence, sequence_in_use,
};
use crate::domains::records::status::{is_allowed_edit_status, RecordStatus};
use crate::kernel::ServerDeps;

use super::{parse_transaction_date, regenerate_document, RecordOutcome};

#[derive(Debug, Clone)]
pub struct CreateRecordInput {
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// `AAAA-MM-DDTHH:MM`, as produced by a datetime-local field.
    pub transaction_date: Option<String>,
    pub description: Option<String>,
    /// When present, claims this sequence instead of auto-allocating.
    pub manual_sequence: Option<String>,
    /// Optional initial status from the selectable set; defaults to
    /// `pending`, invalid values are ignored with a warning.
    pub status: Option<String>,
    pub department_id: DepartmentId,
}

/// Open a new record in a department, allocating its sequence and digital
/// number and writing the opening history line.
pub async fn create_record(
    actor: &Actor,
    input: CreateRecordInput,
    deps: &ServerDeps,
) -> Result<RecordOutcome, RecordError> {
    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(RecordError::validation(
            "El nombre del solicitante es obligatorio.",
        ));
    }

    let department = Department::find_by_id(input.department_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Departamento no encontrado."))?;

    if !actor.is_admin() && actor.department != department.name {
        return Err(RecordError::authorization(
            "Solo puede iniciar expedientes en su propio departamento.",
        ));
    }

    let transaction_date = input
        .transaction_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_transaction_date)
        .transpose()?;

    let mut warnings = Vec::new();

    let status = match input.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) if is_allowed_edit_status(raw) => raw.to_string(),
        Some(raw) => {
            warnings.push(format!(
                "Advertencia: El estado '{raw}' no es válido y fue ignorado."
            ));
            RecordStatus::Pending.as_str().to_string()
        }
        None => RecordStatus::Pending.as_str().to_string(),
    };

    let mut tx = deps.db_pool.begin().await?;

    let sequence = match input.manual_sequence.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let wanted = parse_manual_sequence(raw)?;
            if sequence_in_use(wanted, &mut tx).await? {
                return Err(RecordError::conflict(format!(
                    "El número de secuencia manual \"{wanted:04}\" ya está en uso."
                )));
            }
            wanted
        }
        None => next_available_sequence(&mut tx).await?,
    };

    let number = digital_number(&department.code(), sequence, Utc::now().date_naive());

    // The EXISTS pre-check cannot see a concurrent uncommitted claim; the
    // race loser surfaces here as a unique violation and must still read
    // as a conflict, not an internal error.
    let record = Record::insert(
        NewRecord {
            sequence_number: sequence,
            digital_number: number,
            full_name: full_name.to_string(),
            dni: input.dni,
            address: input.address,
            phone: input.phone,
            email: input.email,
            transaction_date,
            description: input.description,
            attachment_filename: None,
            status,
            department_id: department.id,
            created_by: actor.id,
        },
        &mut tx,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            RecordError::conflict(format!(
                "El número de secuencia \"{sequence:04}\" ya está en uso."
            ))
        } else {
            RecordError::Database(e)
        }
    })?;

    RecordHistory::append(
        record.id,
        HistoryAction::Creation,
        format!("Expediente iniciado en el departamento {}.", department.name),
        Some(actor.id),
        &mut tx,
    )
    .await?;

    regenerate_document(&record, &department.name, deps, &mut tx, &mut warnings).await?;

    tx.commit().await?;

    info!(
        record_id = %record.id,
        digital_number = %record.digital_number,
        department = %department.name,
        "record created"
    );

    Ok(RecordOutcome { record, warnings })
}

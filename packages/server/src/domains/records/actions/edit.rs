use chrono::Utc;
use tracing::info;

use crate::common::{Actor, DepartmentId, RecordError, RecordId};
use crate::domains::departments::Department;
use crate::domains::records::models::{HistoryAction, Record, RecordHistory};
use crate::domains::records::numbering::digital_number;
use crate::domains::records::status::{capitalize, is_allowed_edit_status, RecordStatus};
use crate::kernel::ServerDeps;

use super::{parse_transaction_date, regenerate_document, RecordOutcome};

#[derive(Debug, Clone)]
pub struct EditRecordInput {
    pub full_name: String,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub transaction_date: Option<String>,
    pub description: Option<String>,
    pub department_id: DepartmentId,
    /// Optional explicit status. Ignored with a warning when it is not one
    /// of the edit-selectable statuses.
    pub status: Option<String>,
}

/// Direct administrative edit of a record's data.
///
/// Changing the department here does NOT record a transfer: the digital
/// number is rebuilt in the single-code shape with the current date and the
/// status falls back to `pending`, unless an explicit valid status is given.
pub async fn edit_record(
    actor: &Actor,
    record_id: RecordId,
    input: EditRecordInput,
    deps: &ServerDeps,
) -> Result<RecordOutcome, RecordError> {
    if !actor.is_admin() {
        return Err(RecordError::authorization(
            "Solo un administrador puede editar expedientes.",
        ));
    }

    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(RecordError::validation(
            "El nombre del solicitante es obligatorio.",
        ));
    }

    let record = Record::find_by_id(record_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Expediente no encontrado."))?;

    let department = Department::find_by_id(input.department_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Departamento no encontrado."))?;

    let transaction_date = input
        .transaction_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_transaction_date)
        .transpose()?;

    let department_changed = department.id != record.department_id;

    let mut warnings = Vec::new();

    // A department change rebuilds the number with today's date and resets
    // the workflow status. An explicit valid status afterwards still wins.
    let (digital, mut status) = if department_changed {
        (
            digital_number(
                &department.code(),
                record.sequence_number,
                Utc::now().date_naive(),
            ),
            RecordStatus::Pending.as_str().to_string(),
        )
    } else {
        (record.digital_number.clone(), record.status.clone())
    };

    if let Some(raw) = input.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if is_allowed_edit_status(raw) {
            status = raw.to_string();
        } else {
            warnings.push(format!(
                "Advertencia: El estado '{raw}' no es válido y fue ignorado."
            ));
        }
    }

    let mut tx = deps.db_pool.begin().await?;

    let record = Record::apply_edit(
        record.id,
        full_name,
        input.dni.as_deref(),
        input.address.as_deref(),
        input.phone.as_deref(),
        input.email.as_deref(),
        input.description.as_deref(),
        transaction_date,
        department.id,
        &digital,
        &status,
        &mut tx,
    )
    .await?;

    RecordHistory::append(
        record.id,
        HistoryAction::Modification,
        format!(
            "Datos del expediente actualizados. Departamento final: {}. Estado final: {}.",
            department.name,
            capitalize(&record.status)
        ),
        Some(actor.id),
        &mut tx,
    )
    .await?;

    regenerate_document(&record, &department.name, deps, &mut tx, &mut warnings).await?;

    tx.commit().await?;

    info!(
        record_id = %record.id,
        digital_number = %record.digital_number,
        department_changed,
        "record edited"
    );

    Ok(RecordOutcome { record, warnings })
}

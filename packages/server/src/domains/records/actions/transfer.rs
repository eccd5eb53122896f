use tracing::info;

use crate::common::{Actor, DepartmentId, RecordError, RecordId};
use crate::domains::departments::Department;
use crate::domains::records::models::{HistoryAction, Record, RecordHistory};
use crate::domains::records::numbering::transfer_digital_number;
use crate::domains::records::status::{is_transferable, RecordStatus};
use crate::kernel::ServerDeps;

/// Result of a transfer request. `transferred` is false for the same-
/// department no-op, which writes nothing and carries an explanatory
/// message instead.
#[derive(Debug)]
pub struct TransferOutcome {
    pub record: Record,
    pub transferred: bool,
    pub message: Option<String>,
    pub warnings: Vec<String>,
}

/// Move a record to another department through the resend workflow.
///
/// The digital number gains the dual-code shape, keeping the date of the
/// previous number, and the status becomes `in_progress`. An unparseable
/// previous number aborts before any write.
pub async fn transfer_record(
    actor: &Actor,
    record_id: RecordId,
    destination_id: DepartmentId,
    deps: &ServerDeps,
) -> Result<TransferOutcome, RecordError> {
    if !actor.can_transfer() {
        return Err(RecordError::authorization(
            "Solo un administrador de Intendencia puede transferir expedientes.",
        ));
    }

    let record = Record::find_by_id(record_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Expediente no encontrado."))?;

    // Status gates the whole operation, before the destination is even
    // looked at.
    if !is_transferable(&record.status) {
        return Err(RecordError::validation(format!(
            "Solo los expedientes en estado 'pending' o 'urgente' pueden ser transferidos. \
             Estado actual: '{}'.",
            record.status
        )));
    }

    let origin = Department::find_by_id(record.department_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Departamento de origen no encontrado."))?;

    let destination = Department::find_by_id(destination_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Departamento de destino no encontrado."))?;

    if origin.id == destination.id {
        return Ok(TransferOutcome {
            record,
            transferred: false,
            message: Some(format!(
                "El expediente ya se encuentra en el departamento '{}'.",
                destination.name
            )),
            warnings: Vec::new(),
        });
    }

    let number = transfer_digital_number(
        &origin.code(),
        &destination.code(),
        record.sequence_number,
        &record.digital_number,
    )?;

    let mut tx = deps.db_pool.begin().await?;

    let record = Record::apply_transfer(
        record.id,
        destination.id,
        &number,
        RecordStatus::InProgress.as_str(),
        &mut tx,
    )
    .await?;

    RecordHistory::append(
        record.id,
        HistoryAction::Resend,
        format!(
            "Movido del departamento '{}' al departamento '{}'. \
             Nuevo número digital: {}. Estado actualizado a 'En Progreso'.",
            origin.name, destination.name, record.digital_number
        ),
        Some(actor.id),
        &mut tx,
    )
    .await?;

    let mut warnings = Vec::new();
    super::regenerate_document(&record, &destination.name, deps, &mut tx, &mut warnings).await?;

    tx.commit().await?;

    info!(
        record_id = %record.id,
        from = %origin.name,
        to = %destination.name,
        digital_number = %record.digital_number,
        "record transferred"
    );

    Ok(TransferOutcome {
        record,
        transferred: true,
        message: None,
        warnings,
    })
}

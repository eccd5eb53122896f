//! Record workflow actions.
//!
//! Each action authorizes the actor, runs its writes and the matching
//! history line in one transaction, and regenerates the printable document
//! afterwards. Renderer failures surface as warnings on the outcome, never
//! as errors.

mod attach;
mod create;
mod edit;
mod note;
mod queries;
mod transfer;

pub use attach::attach_file;
pub use create::{create_record, CreateRecordInput};
pub use edit::{edit_record, EditRecordInput};
pub use note::add_note;
pub use queries::{get_record, list_records, record_history, record_notes};
pub use transfer::{transfer_record, TransferOutcome};

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{Postgres, Transaction};
use tracing::warn;

use crate::common::{Actor, RecordError, RecordId};
use crate::domains::departments::Department;
use crate::domains::records::Record;
use crate::kernel::ServerDeps;

/// A mutated record plus any non-fatal warnings accumulated on the way.
#[derive(Debug)]
pub struct RecordOutcome {
    pub record: Record,
    pub warnings: Vec<String>,
}

/// Accepted wire format for the optional transaction date.
const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub(crate) fn parse_transaction_date(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    NaiveDateTime::parse_from_str(raw.trim(), TRANSACTION_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            RecordError::validation(
                "Formato de fecha de trámite inválido. Use AAAA-MM-DDTHH:MM.",
            )
        })
}

/// Regenerate the printable document for `record` inside `tx`. On renderer
/// failure the document column is left untouched and a warning is pushed.
pub(crate) async fn regenerate_document(
    record: &Record,
    department_name: &str,
    deps: &ServerDeps,
    tx: &mut Transaction<'_, Postgres>,
    warnings: &mut Vec<String>,
) -> Result<(), sqlx::Error> {
    match deps.renderer.render(record, department_name).await {
        Ok(filename) => {
            Record::set_generated_doc(record.id, &filename, tx).await?;
        }
        Err(e) => {
            warn!(record_id = %record.id, error = %e, "document generation failed");
            warnings.push(format!(
                "Advertencia: No se pudo generar el documento del expediente: {e}"
            ));
        }
    }
    Ok(())
}

/// Load a record and its department, refusing actors outside its visibility.
pub(crate) async fn visible_record(
    actor: &Actor,
    record_id: RecordId,
    deps: &ServerDeps,
) -> Result<(Record, Department), RecordError> {
    let record = Record::find_by_id(record_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Expediente no encontrado."))?;
    let department = Department::find_by_id(record.department_id, &deps.db_pool)
        .await?
        .ok_or_else(|| RecordError::not_found("Departamento no encontrado."))?;
    if !actor.can_view_record(&department.name) {
        return Err(RecordError::authorization(
            "No tiene permisos para ver este expediente.",
        ));
    }
    Ok((record, department))
}

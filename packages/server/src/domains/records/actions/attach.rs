use chrono::Utc;
use tracing::{info, warn};

use crate::common::{Actor, RecordError, RecordId};
use crate::domains::records::models::{HistoryAction, Record, RecordHistory};
use crate::domains::records::numbering::{attachment_filename, file_extension};
use crate::kernel::ServerDeps;

use super::{regenerate_document, visible_record, RecordOutcome};

/// Attach (or replace) the uploaded file of a record.
///
/// The stored name is derived from the record, not the upload, so a
/// re-upload on the same day overwrites in place. When the derived name
/// changes, the previous file is removed; failure to remove it only warns.
pub async fn attach_file(
    actor: &Actor,
    record_id: RecordId,
    original_filename: &str,
    bytes: &[u8],
    deps: &ServerDeps,
) -> Result<RecordOutcome, RecordError> {
    if bytes.is_empty() {
        return Err(RecordError::validation("El archivo adjunto está vacío."));
    }

    let (record, department) = visible_record(actor, record_id, deps).await?;

    let filename = attachment_filename(
        &department.code(),
        record.sequence_number,
        &record.full_name,
        Utc::now().date_naive(),
        file_extension(original_filename),
    );

    deps.files.store(&filename, bytes).await?;

    let mut warnings = Vec::new();
    if let Some(previous) = record.attachment_filename.as_deref() {
        if previous != filename {
            if let Err(e) = deps.files.remove(previous).await {
                warn!(record_id = %record.id, previous, error = %e, "stale attachment removal failed");
                warnings.push(format!(
                    "Advertencia: No se pudo eliminar el adjunto anterior '{previous}'."
                ));
            }
        }
    }

    let mut tx = deps.db_pool.begin().await?;

    let record = Record::set_attachment(record.id, &filename, &mut tx).await?;

    RecordHistory::append(
        record.id,
        HistoryAction::Attachment,
        format!("Archivo '{filename}' fue adjuntado/actualizado."),
        Some(actor.id),
        &mut tx,
    )
    .await?;

    regenerate_document(&record, &department.name, deps, &mut tx, &mut warnings).await?;

    tx.commit().await?;

    info!(record_id = %record.id, filename = %filename, "attachment stored");

    Ok(RecordOutcome { record, warnings })
}

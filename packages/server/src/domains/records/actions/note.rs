use tracing::info;

use crate::common::{Actor, RecordError, RecordId};
use crate::domains::records::models::{HistoryAction, Note, RecordHistory};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::visible_record;

/// Add a note to a record. Notes never regenerate the printable document.
pub async fn add_note(
    actor: &Actor,
    record_id: RecordId,
    content: &str,
    deps: &ServerDeps,
) -> Result<Note, RecordError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(RecordError::validation("La nota no puede estar vacía."));
    }

    let (record, _department) = visible_record(actor, record_id, deps).await?;

    // History quotes the author's display name, not the login.
    let author = User::find_by_id(actor.id, &deps.db_pool)
        .await?
        .and_then(|u| u.name)
        .unwrap_or_else(|| actor.username.clone());

    let mut tx = deps.db_pool.begin().await?;

    let note = Note::create(record.id, actor.id, content, &mut tx).await?;

    let preview: String = content.chars().take(100).collect();
    let ellipsis = if content.chars().count() > 100 { "..." } else { "" };
    RecordHistory::append(
        record.id,
        HistoryAction::NoteAdded,
        format!("Nota agregada por {author}: '{preview}{ellipsis}'"),
        Some(actor.id),
        &mut tx,
    )
    .await?;

    tx.commit().await?;

    info!(record_id = %record.id, note_id = %note.id, "note added");

    Ok(note)
}

use crate::common::{Actor, RecordError, RecordId};
use crate::domains::departments::Department;
use crate::domains::records::models::{Note, Record, RecordFilter, RecordHistory};
use crate::kernel::ServerDeps;

use super::visible_record;

/// List records visible to `actor`, newest first.
///
/// Non-privileged actors are scoped to their own department regardless of
/// the requested filter. An actor whose department no longer exists sees
/// an empty list rather than an error.
pub async fn list_records(
    actor: &Actor,
    mut filter: RecordFilter,
    deps: &ServerDeps,
) -> Result<Vec<Record>, RecordError> {
    if !actor.can_view_all_departments() {
        let Some(own) = Department::find_by_name(&actor.department, &deps.db_pool).await? else {
            return Ok(Vec::new());
        };
        filter.department_id = Some(own.id);
    }
    Ok(Record::list(&filter, &deps.db_pool).await?)
}

/// Fetch one record with its department, enforcing visibility.
pub async fn get_record(
    actor: &Actor,
    record_id: RecordId,
    deps: &ServerDeps,
) -> Result<(Record, Department), RecordError> {
    visible_record(actor, record_id, deps).await
}

/// Full audit trail of a record, newest first.
pub async fn record_history(
    actor: &Actor,
    record_id: RecordId,
    deps: &ServerDeps,
) -> Result<Vec<RecordHistory>, RecordError> {
    let (record, _) = visible_record(actor, record_id, deps).await?;
    Ok(RecordHistory::list_for_record(record.id, &deps.db_pool).await?)
}

/// Notes on a record, newest first.
pub async fn record_notes(
    actor: &Actor,
    record_id: RecordId,
    deps: &ServerDeps,
) -> Result<Vec<Note>, RecordError> {
    let (record, _) = visible_record(actor, record_id, deps).await?;
    Ok(Note::list_for_record(record.id, &deps.db_pool).await?)
}

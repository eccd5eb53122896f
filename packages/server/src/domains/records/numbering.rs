//! Sequence allocation and digital-number formatting.
//!
//! Sequence numbers ending in 8 or 9 are never auto-assigned; those digits
//! are reserved for manually-numbered records. The current maximum is read
//! inside the caller's transaction at allocation time and never cached.
//!
//! Digital numbers come in two shapes:
//! - creation / direct edit: `<CODE>-<SEQ:04>-<DD-MM-YYYY>` (date of the change)
//! - transfer: `<LEAVING>-<ARRIVING>-<SEQ:04>-<DD-MM-YYYY>` (date preserved
//!   from the previous number)

use chrono::NaiveDate;
use sqlx::{Postgres, Transaction};

use crate::common::RecordError;

/// Date component format shared by digital numbers and attachment names.
pub const NUMBER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Manual sequence numbers must lie strictly inside this range.
const MANUAL_SEQUENCE_MAX: i64 = 10_000;

/// Smallest valid sequence strictly greater than `current_max` whose last
/// decimal digit is neither 8 nor 9.
pub fn next_sequence_after(current_max: i64) -> i64 {
    let mut next = current_max + 1;
    while next % 10 == 8 || next % 10 == 9 {
        next += 1;
    }
    next
}

/// Allocate the next auto sequence within the caller's transaction.
pub async fn next_available_sequence(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<i64, sqlx::Error> {
    let current_max: Option<i64> = sqlx::query_scalar("SELECT MAX(sequence_number) FROM records")
        .fetch_one(&mut **tx)
        .await?;
    Ok(next_sequence_after(current_max.unwrap_or(0)))
}

/// Validate a manually-entered sequence number.
pub fn parse_manual_sequence(raw: &str) -> Result<i64, RecordError> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        RecordError::validation(
            "El número de secuencia manual debe ser un número válido (ej: 0008).",
        )
    })?;
    if value <= 0 || value >= MANUAL_SEQUENCE_MAX {
        return Err(RecordError::validation(
            "El número de secuencia manual debe estar entre 1 y 9999.",
        ));
    }
    Ok(value)
}

/// Whether `sequence` is already claimed by any record. Checked inside the
/// transaction; the UNIQUE constraint decides concurrent claims.
pub async fn sequence_in_use(
    sequence: i64,
    tx: &mut Transaction<'_, Postgres>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM records WHERE sequence_number = $1)")
        .bind(sequence)
        .fetch_one(&mut **tx)
        .await
}

/// Single-code digital number used at creation and direct edit.
pub fn digital_number(dept_code: &str, sequence: i64, date: NaiveDate) -> String {
    format!(
        "{}-{:04}-{}",
        dept_code,
        sequence,
        date.format(NUMBER_DATE_FORMAT)
    )
}

/// Dual-code digital number used by a transfer. The trailing date is taken
/// verbatim from `previous` (its last three hyphen-delimited segments); a
/// previous number with fewer than five segments cannot yield a date and is
/// a conflict.
pub fn transfer_digital_number(
    leaving_code: &str,
    arriving_code: &str,
    sequence: i64,
    previous: &str,
) -> Result<String, RecordError> {
    let parts: Vec<&str> = previous.split('-').collect();
    if parts.len() < 5 {
        return Err(RecordError::conflict(format!(
            "Formato de número digital '{previous}' no es válido para extraer fecha y secuencia."
        )));
    }
    let date_part = format!(
        "{}-{}-{}",
        parts[parts.len() - 3],
        parts[parts.len() - 2],
        parts[parts.len() - 1]
    );
    Ok(format!(
        "{leaving_code}-{arriving_code}-{sequence:04}-{date_part}"
    ))
}

/// Lowercased applicant name with spaces as underscores and anything
/// outside `[a-z0-9._-]` stripped, for use inside attachment filenames.
pub fn applicant_slug(full_name: &str) -> String {
    full_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect()
}

/// Deterministic attachment name:
/// `<DEPT_CODE>-<SEQ:04>-<applicant_slug>-<DD-MM-YYYY><.ext>`.
pub fn attachment_filename(
    dept_code: &str,
    sequence: i64,
    full_name: &str,
    date: NaiveDate,
    extension: Option<&str>,
) -> String {
    let ext = extension
        .map(|e| format!(".{}", e.trim_start_matches('.')))
        .unwrap_or_default();
    format!(
        "{}-{:04}-{}-{}{}",
        dept_code,
        sequence,
        applicant_slug(full_name),
        date.format(NUMBER_DATE_FORMAT),
        ext
    )
}

/// File extension (without the dot) of an uploaded filename, if any.
pub fn file_extension(filename: &str) -> Option<&str> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
}

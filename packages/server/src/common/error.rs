use thiserror::Error;

/// Domain errors for record operations.
///
/// Renderer failures are deliberately not represented here: they are
/// downgraded to warnings on the operation outcome and never abort an
/// otherwise-successful mutation. A failed attachment write, by contrast,
/// does abort, since the row would otherwise point at a missing file.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Malformed input (manual sequence, dates, missing fields). No state change.
    #[error("Validación: {0}")]
    Validation(String),

    /// Duplicate manual sequence or an unparseable digital number during
    /// transfer. The operation is rolled back entirely.
    #[error("Conflicto: {0}")]
    Conflict(String),

    /// Actor lacks the role or department required for the action. Refused
    /// before any write.
    #[error("No autorizado: {0}")]
    Authorization(String),

    /// Unknown record, department, or user.
    #[error("No encontrado: {0}")]
    NotFound(String),

    #[error("Error de base de datos: {0}")]
    Database(#[from] sqlx::Error),

    /// Collaborator failure that must abort the operation, such as a failed
    /// attachment write.
    #[error("Error interno: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Whether `e` is a Postgres unique-constraint violation, i.e. the losing
/// side of a race that an in-transaction EXISTS pre-check could not see.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl RecordError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

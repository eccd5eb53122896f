//! Record status literals.
//!
//! Two historically distinct sets coexist: the workflow statuses written by
//! the engine itself (`pending`, `in_progress`, `urgente`) and the legacy
//! set selectable through the edit form (`activo`, `pendiente`,
//! `en progreso`, `urgente`). The literal strings are externally visible
//! and compared verbatim, so both sets are kept exactly as-is.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Default workflow status; also forced by a direct department edit.
    Pending,
    /// Set by a successful transfer.
    InProgress,
    Urgente,
    // Legacy edit-selectable statuses.
    Activo,
    Pendiente,
    EnProgreso,
}

/// Statuses an administrator may pick explicitly when editing a record.
pub const ALLOWED_EDIT_STATUSES: [&str; 4] = ["activo", "pendiente", "en progreso", "urgente"];

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Urgente => "urgente",
            Self::Activo => "activo",
            Self::Pendiente => "pendiente",
            Self::EnProgreso => "en progreso",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "urgente" => Some(Self::Urgente),
            "activo" => Some(Self::Activo),
            "pendiente" => Some(Self::Pendiente),
            "en progreso" => Some(Self::EnProgreso),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only pending and urgente records may be transferred.
pub fn is_transferable(status: &str) -> bool {
    status == RecordStatus::Pending.as_str() || status == RecordStatus::Urgente.as_str()
}

/// Whether `status` may be chosen explicitly during an edit.
pub fn is_allowed_edit_status(status: &str) -> bool {
    ALLOWED_EDIT_STATUSES.contains(&status)
}

/// First letter uppercased, as shown in history details and messages.
pub fn capitalize(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_all_literals() {
        for s in ["pending", "in_progress", "urgente", "activo", "pendiente", "en progreso"] {
            assert_eq!(RecordStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(RecordStatus::parse("archived").is_none());
    }

    #[test]
    fn only_pending_and_urgente_are_transferable() {
        assert!(is_transferable("pending"));
        assert!(is_transferable("urgente"));
        assert!(!is_transferable("in_progress"));
        assert!(!is_transferable("activo"));
        assert!(!is_transferable("pendiente"));
    }

    #[test]
    fn edit_statuses_are_the_legacy_set() {
        assert!(is_allowed_edit_status("en progreso"));
        assert!(is_allowed_edit_status("activo"));
        // The workflow literals are not edit-selectable.
        assert!(!is_allowed_edit_status("pending"));
        assert!(!is_allowed_edit_status("in_progress"));
    }

    #[test]
    fn capitalize_only_touches_the_first_letter() {
        assert_eq!(capitalize("en progreso"), "En progreso");
        assert_eq!(capitalize(""), "");
    }
}

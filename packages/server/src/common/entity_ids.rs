//! Typed ID definitions for all domain entities.
//!
//! Type aliases over `Id<T>` give compile-time safety for ID usage
//! throughout the application.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (staff accounts).
pub struct User;

/// Marker type for Department entities.
pub struct Department;

/// Marker type for Record entities (expedientes).
pub struct Record;

/// Marker type for RecordHistory entries (audit trail rows).
pub struct RecordHistory;

/// Marker type for Note entities (record annotations).
pub struct Note;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Department entities.
pub type DepartmentId = Id<Department>;

/// Typed ID for Record entities.
pub type RecordId = Id<Record>;

/// Typed ID for RecordHistory entries.
pub type HistoryId = Id<RecordHistory>;

/// Typed ID for Note entities.
pub type NoteId = Id<Note>;

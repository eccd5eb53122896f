// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Record workflow rules live in the domains and call through these traits.
//
// Naming convention: Base* for trait names.

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::records::Record;

// =============================================================================
// Document Renderer (printable cover sheet per record)
// =============================================================================

#[async_trait]
pub trait BaseDocumentRenderer: Send + Sync {
    /// Render the printable document for `record` and return the filename it
    /// was stored under. A failure here is reported as a warning by callers
    /// and never rolls back the record mutation.
    async fn render(&self, record: &Record, department_name: &str) -> Result<String>;
}

// =============================================================================
// File Store (attachment bytes)
// =============================================================================

#[async_trait]
pub trait BaseFileStore: Send + Sync {
    /// Persist `bytes` under `filename`, replacing any existing file.
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<()>;

    /// Remove a stored file. Missing files are not an error.
    async fn remove(&self, filename: &str) -> Result<()>;

    /// Read a stored file back, or `None` if it does not exist.
    async fn load(&self, filename: &str) -> Result<Option<Vec<u8>>>;
}

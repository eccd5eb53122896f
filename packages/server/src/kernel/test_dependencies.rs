// Test doubles for the kernel traits.
//
// Compiled unconditionally so integration tests under tests/ can use them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::domains::records::Record;
use crate::kernel::{BaseDocumentRenderer, BaseFileStore};

// =============================================================================
// Renderers
// =============================================================================

/// Renderer that records nothing and always succeeds.
pub struct NoopRenderer;

#[async_trait]
impl BaseDocumentRenderer for NoopRenderer {
    async fn render(&self, record: &Record, _department_name: &str) -> Result<String> {
        Ok(format!(
            "expediente_{}_{}.html",
            record.id,
            record.digital_number.replace('-', "_")
        ))
    }
}

/// Renderer that always fails, for exercising the warning path.
pub struct FailingRenderer;

#[async_trait]
impl BaseDocumentRenderer for FailingRenderer {
    async fn render(&self, _record: &Record, _department_name: &str) -> Result<String> {
        Err(anyhow!("renderer out of order"))
    }
}

// =============================================================================
// In-memory file store
// =============================================================================

#[derive(Default)]
pub struct MemoryFileStore {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.lock().unwrap().contains_key(filename)
    }

    pub fn stored_names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl BaseFileStore for MemoryFileStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(filename.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, filename: &str) -> Result<()> {
        self.files.lock().unwrap().remove(filename);
        Ok(())
    }

    async fn load(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.lock().unwrap().get(filename).cloned())
    }
}

//! Local filesystem attachment storage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::kernel::BaseFileStore;

/// Stores attachments as plain files under a base directory. Filenames are
/// produced by the records domain and contain no path separators.
pub struct LocalFileStore {
    base_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }
}

#[async_trait]
impl BaseFileStore for LocalFileStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .with_context(|| format!("creando directorio {}", self.base_dir.display()))?;
        let path = self.path_for(filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("escribiendo adjunto {}", path.display()))
    }

    async fn remove(&self, filename: &str) -> Result<()> {
        let path = self.path_for(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("eliminando adjunto {}", path.display())),
        }
    }

    async fn load(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("leyendo adjunto {}", path.display())),
        }
    }
}

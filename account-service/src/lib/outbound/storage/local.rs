use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::file::errors::FileError;
use crate::file::models::StoredFile;
use crate::file::ports::FileStorage;

/// Stores files under a root directory on the local disk.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, relative_path: &str) -> Result<PathBuf, FileError> {
        let relative = Path::new(relative_path);
        let inside_root = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if relative_path.is_empty() || !inside_root {
            return Err(FileError::Storage(format!(
                "path escapes storage root: {}",
                relative_path
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, relative_path: &str, bytes: &[u8]) -> Result<StoredFile, FileError> {
        let path = self.resolve(relative_path)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FileError::Storage(e.to_string()))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| FileError::Storage(e.to_string()))?;

        Ok(StoredFile {
            path: relative_path.to_string(),
            size: bytes.len() as u64,
        })
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::models::Document;
use crate::utils::error::AppError;

/// Handle to the flat JSON document backing the whole service.
///
/// There is no in-memory cache: every call re-reads the file, and every
/// mutation rewrites it in full. The file is the sole source of truth.
#[derive(Clone)]
pub struct JsonStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes read-modify-write cycles. Mutating callers must hold the
    /// guard across load + mutate + persist, otherwise a concurrent writer's
    /// full-document rewrite would discard their update.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Loads the current document, initializing the file on first access.
    ///
    /// A file that fails to deserialize is reset to the empty document —
    /// unparseable content is discarded. Read errors other than
    /// missing-file fall back to the empty document in memory and leave the
    /// file untouched.
    pub fn load(&self) -> Document {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Creating new {} with default data", self.path.display());
                return self.reset_to_default();
            }
            Err(e) => {
                log::error!("Error reading {}: {}", self.path.display(), e);
                return Document::default();
            }
        };

        if raw.is_empty() {
            log::debug!("Creating new {} with default data", self.path.display());
            return self.reset_to_default();
        }

        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("Invalid JSON in {}: {}", self.path.display(), e);
                self.reset_to_default()
            }
        }
    }

    /// Fully replaces the file contents with the given document.
    pub fn persist(&self, doc: &Document) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(doc)
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| AppError::StorageError(e.to_string()))?;
        log::debug!("Successfully wrote {}", self.path.display());
        Ok(())
    }

    fn reset_to_default(&self) -> Document {
        let doc = Document::default();
        if let Err(e) = self.persist(&doc) {
            log::error!("Error writing {}: {}", self.path.display(), e);
        }
        doc
    }
}

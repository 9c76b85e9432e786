//! Storage backends holding the medicine document

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::model::MedicineDocument;
use crate::store::StoreError;

/// Load/save access to the whole document
#[async_trait]
pub trait Backend: Send + Sync {
  async fn load(&self) -> Result<MedicineDocument, StoreError>;
  async fn save(&self, doc: &MedicineDocument) -> Result<(), StoreError>;
}

/// Document kept in a JSON file on disk
pub struct JsonFileBackend {
  path: PathBuf,
}

impl JsonFileBackend {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Write an empty document if the file does not exist yet.
  /// Returns true if a file was created.
  pub async fn create_if_missing(&self) -> Result<bool, StoreError> {
    let exists = tokio::fs::try_exists(&self.path)
      .await
      .map_err(|e| self.io_error(e))?;
    if exists {
      return Ok(false);
    }
    self.save(&MedicineDocument::default()).await?;
    info!("Created empty medicine document at {}", self.path.display());
    Ok(true)
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self
      .path
      .file_name()
      .map(|n| n.to_os_string())
      .unwrap_or_else(|| "medicines.json".into());
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn io_error(&self, source: std::io::Error) -> StoreError {
    StoreError::Io {
      path: self.path.clone(),
      source,
    }
  }
}

#[async_trait]
impl Backend for JsonFileBackend {
  async fn load(&self) -> Result<MedicineDocument, StoreError> {
    let bytes = tokio::fs::read(&self.path)
      .await
      .map_err(|e| self.io_error(e))?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
      path: self.path.clone(),
      source,
    })
  }

  async fn save(&self, doc: &MedicineDocument) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(doc).map_err(StoreError::Encode)?;

    // Replace the document in one rename so readers never see a partial write
    let tmp = self.temp_path();
    tokio::fs::write(&tmp, &bytes)
      .await
      .map_err(|e| self.io_error(e))?;
    tokio::fs::rename(&tmp, &self.path)
      .await
      .map_err(|e| self.io_error(e))?;

    debug!(
      "Wrote {} medicines to {}",
      doc.medicines.len(),
      self.path.display()
    );
    Ok(())
  }
}

/// In-memory document, used by tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryBackend {
  doc: std::sync::Mutex<MedicineDocument>,
}

#[cfg(test)]
impl MemoryBackend {
  pub fn new(doc: MedicineDocument) -> Self {
    Self {
      doc: std::sync::Mutex::new(doc),
    }
  }

  /// Copy of the current document
  pub fn snapshot(&self) -> Result<MedicineDocument, StoreError> {
    let doc = self.doc.lock().map_err(|_| StoreError::LockPoisoned)?;
    Ok(doc.clone())
  }
}

#[cfg(test)]
#[async_trait]
impl Backend for MemoryBackend {
  async fn load(&self) -> Result<MedicineDocument, StoreError> {
    self.snapshot()
  }

  async fn save(&self, doc: &MedicineDocument) -> Result<(), StoreError> {
    let mut guard = self.doc.lock().map_err(|_| StoreError::LockPoisoned)?;
    *guard = doc.clone();
    Ok(())
  }
}

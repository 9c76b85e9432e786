//! Medicine store: the only path between handlers and the document.
//!
//! Every call loads the document fresh from the backend. Mutating calls
//! take the writer lock for the whole load-mutate-save cycle, so two
//! concurrent writers in this process can't overwrite each other's change.

pub mod backend;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::{Medicine, MedicineDocument};

pub use backend::{Backend, JsonFileBackend};
#[cfg(test)]
pub use backend::MemoryBackend;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("failed to access {path}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("malformed document {path}: {source}")]
  Malformed {
    path: PathBuf,
    source: serde_json::Error,
  },
  #[error("failed to encode document: {0}")]
  Encode(serde_json::Error),
  #[cfg(test)]
  #[error("lock poisoned")]
  LockPoisoned,
}

/// Store accessor over a document backend
pub struct Store {
  backend: Arc<dyn Backend>,
  write_lock: Mutex<()>,
}

impl Store {
  pub fn new(backend: Arc<dyn Backend>) -> Self {
    Self {
      backend,
      write_lock: Mutex::new(()),
    }
  }

  /// Load the whole document
  pub async fn load_all(&self) -> Result<MedicineDocument, StoreError> {
    self.backend.load().await
  }

  /// Find a record by exact name
  pub async fn find_by_name(&self, name: &str) -> Result<Option<Medicine>, StoreError> {
    let doc = self.load_all().await?;
    Ok(doc.find(name).cloned())
  }

  /// Whether a record with this name is on disk right now
  pub async fn exists(&self, name: &str) -> Result<bool, StoreError> {
    Ok(self.find_by_name(name).await?.is_some())
  }

  /// Append a record. Returns false without writing if the name is taken.
  pub async fn append(&self, record: Medicine) -> Result<bool, StoreError> {
    let _guard = self.write_lock.lock().await;
    let mut doc = self.load_all().await?;
    if doc.contains(&record.name) {
      return Ok(false);
    }
    doc.medicines.push(record);
    self.backend.save(&doc).await?;
    Ok(true)
  }

  /// Overwrite the price of a record. Returns false without writing if
  /// there is no such record.
  pub async fn update_price(&self, name: &str, price: f64) -> Result<bool, StoreError> {
    let _guard = self.write_lock.lock().await;
    let mut doc = self.load_all().await?;
    match doc.find_mut(name) {
      Some(medicine) => medicine.set_price(price),
      None => return Ok(false),
    }
    self.backend.save(&doc).await?;
    Ok(true)
  }

  /// Remove a record. Returns false without writing if there is no such record.
  pub async fn remove(&self, name: &str) -> Result<bool, StoreError> {
    let _guard = self.write_lock.lock().await;
    let mut doc = self.load_all().await?;
    if doc.remove(name).is_none() {
      return Ok(false);
    }
    self.backend.save(&doc).await?;
    Ok(true)
  }
}

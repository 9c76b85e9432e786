//! Medicine records and the document that wraps them on disk.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One medicine entry.
///
/// The price is kept as raw JSON so that documents written by other tools
/// (null, strings, missing) survive a rewrite untouched. `None` means the
/// key is absent; an explicit null is `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Medicine {
  pub name: String,
  #[serde(
    default,
    deserialize_with = "present_value",
    skip_serializing_if = "Option::is_none"
  )]
  pub price: Option<Value>,
  /// Keys this service does not know about
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Any value that is present, including null, becomes `Some`
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
  D: Deserializer<'de>,
{
  Value::deserialize(deserializer).map(Some)
}

impl Medicine {
  /// Create a record with a numeric price
  pub fn new(name: impl Into<String>, price: f64) -> Self {
    Self {
      name: name.into(),
      price: Some(Value::from(price)),
      extra: Map::new(),
    }
  }

  /// The price if it is stored as a finite JSON number
  pub fn numeric_price(&self) -> Option<f64> {
    self
      .price
      .as_ref()
      .and_then(Value::as_f64)
      .filter(|p| p.is_finite())
  }

  pub fn set_price(&mut self, price: f64) {
    self.price = Some(Value::from(price));
  }
}

/// The whole persisted collection: `{ "medicines": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MedicineDocument {
  pub medicines: Vec<Medicine>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl MedicineDocument {
  #[cfg(test)]
  pub fn new(medicines: Vec<Medicine>) -> Self {
    Self {
      medicines,
      extra: Map::new(),
    }
  }

  pub fn find(&self, name: &str) -> Option<&Medicine> {
    self.medicines.iter().find(|m| m.name == name)
  }

  pub fn find_mut(&mut self, name: &str) -> Option<&mut Medicine> {
    self.medicines.iter_mut().find(|m| m.name == name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.find(name).is_some()
  }

  /// Remove the first record named `name`, returning it
  pub fn remove(&mut self, name: &str) -> Option<Medicine> {
    let pos = self.medicines.iter().position(|m| m.name == name)?;
    Some(self.medicines.remove(pos))
  }
}

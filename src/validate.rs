//! Request validators

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
  #[error("Name cannot be empty string")]
  EmptyName,
  #[error("negative or missing price")]
  InvalidPrice,
}

/// Trim a medicine name, rejecting names that are empty afterwards
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
  let name = raw.trim();
  if name.is_empty() {
    return Err(ValidationError::EmptyName);
  }
  Ok(name.to_string())
}

/// A write-path price must be present, finite and not negative
pub fn validate_price(price: Option<f64>) -> Result<f64, ValidationError> {
  match price {
    Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
    _ => Err(ValidationError::InvalidPrice),
  }
}

/// Deserialize an optional price given either as a JSON number or as a
/// numeric string such as `"12.50"`.
pub fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(f64),
    Text(String),
  }

  match Option::<Raw>::deserialize(deserializer)? {
    None => Ok(None),
    Some(Raw::Number(p)) => Ok(Some(p)),
    Some(Raw::Text(s)) => s
      .trim()
      .parse::<f64>()
      .map(Some)
      .map_err(|_| serde::de::Error::custom(format!("price is not a number: {:?}", s))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Deserialize)]
  struct Body {
    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<f64>,
  }

  #[test]
  fn test_name_is_trimmed() {
    assert_eq!(validate_name("  Aspirin  ").unwrap(), "Aspirin");
    assert_eq!(validate_name("Aspirin").unwrap(), "Aspirin");
  }

  #[test]
  fn test_blank_name_rejected() {
    assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
    assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
    assert_eq!(validate_name("\t\n"), Err(ValidationError::EmptyName));
  }

  #[test]
  fn test_price_bounds() {
    assert_eq!(validate_price(Some(0.0)), Ok(0.0));
    assert_eq!(validate_price(Some(9.99)), Ok(9.99));
    assert_eq!(validate_price(Some(-0.01)), Err(ValidationError::InvalidPrice));
    assert_eq!(validate_price(None), Err(ValidationError::InvalidPrice));
    assert_eq!(validate_price(Some(f64::NAN)), Err(ValidationError::InvalidPrice));
    assert_eq!(
      validate_price(Some(f64::INFINITY)),
      Err(ValidationError::InvalidPrice)
    );
  }

  #[test]
  fn test_lenient_price_forms() {
    let b: Body = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
    assert_eq!(b.price, Some(3.5));

    let b: Body = serde_json::from_str(r#"{"price": 7}"#).unwrap();
    assert_eq!(b.price, Some(7.0));

    let b: Body = serde_json::from_str(r#"{"price": " 12.50 "}"#).unwrap();
    assert_eq!(b.price, Some(12.5));

    let b: Body = serde_json::from_str(r#"{"price": null}"#).unwrap();
    assert_eq!(b.price, None);

    let b: Body = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(b.price, None);
  }

  #[test]
  fn test_lenient_price_rejects_garbage() {
    assert!(serde_json::from_str::<Body>(r#"{"price": "abc"}"#).is_err());
    assert!(serde_json::from_str::<Body>(r#"{"price": true}"#).is_err());
    assert!(serde_json::from_str::<Body>(r#"{"price": [1]}"#).is_err());
  }
}

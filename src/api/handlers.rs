//! Endpoint handlers. Each is one load-validate-mutate-respond cycle.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiError;
use crate::average::average_price;
use crate::model::{Medicine, MedicineDocument};
use crate::store::Store;
use crate::validate::{lenient_price, validate_name, validate_price};

/// `medicine` field of responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineBody {
  pub name: String,
  pub price: Option<f64>,
}

impl From<&Medicine> for MedicineBody {
  fn from(medicine: &Medicine) -> Self {
    Self {
      name: medicine.name.clone(),
      price: medicine.numeric_price(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct MedicineResponse {
  pub code: u16,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub medicine: Option<MedicineBody>,
}

#[derive(Debug, Serialize)]
pub struct AverageResponse {
  pub code: u16,
  pub average_price: f64,
}

/// Body of `POST /medicines`
#[derive(Debug, Deserialize)]
pub struct CreateMedicine {
  pub name: String,
  #[serde(default, deserialize_with = "lenient_price")]
  pub price: Option<f64>,
}

/// Body of `PATCH /medicines/{name}`
#[derive(Debug, Deserialize)]
pub struct UpdateMedicine {
  #[serde(default, deserialize_with = "lenient_price")]
  pub price: Option<f64>,
}

/// `GET /medicines`
pub async fn list_all(State(store): State<Arc<Store>>) -> Result<Json<MedicineDocument>, ApiError> {
  let doc = store.load_all().await?;
  info!("Listed {} medicines", doc.medicines.len());
  Ok(Json(doc))
}

/// `GET /medicines/{name}`
pub async fn get_one(
  State(store): State<Arc<Store>>,
  Path(name): Path<String>,
) -> Result<Json<MedicineResponse>, ApiError> {
  let name = validate_name(&name)?;

  match store.find_by_name(&name).await? {
    Some(medicine) => Ok(Json(MedicineResponse {
      code: StatusCode::OK.as_u16(),
      message: None,
      medicine: Some(MedicineBody::from(&medicine)),
    })),
    None => {
      info!("Medicine '{}' not found", name);
      Err(ApiError::NotFound)
    }
  }
}

/// `POST /medicines`
pub async fn create(
  State(store): State<Arc<Store>>,
  payload: Result<Json<CreateMedicine>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicineResponse>), ApiError> {
  let Json(body) = payload?;
  let name = validate_name(&body.name)?;
  let price = validate_price(body.price)?;

  if store.exists(&name).await? {
    return Err(ApiError::Conflict);
  }
  // A concurrent create may have taken the name since the check above
  if !store.append(Medicine::new(name.clone(), price)).await? {
    return Err(ApiError::Conflict);
  }

  let created = store
    .find_by_name(&name)
    .await?
    .ok_or_else(|| ApiError::Internal(format!("medicine '{}' missing after create", name)))?;
  info!("Created medicine '{}'", name);

  Ok((
    StatusCode::CREATED,
    Json(MedicineResponse {
      code: StatusCode::CREATED.as_u16(),
      message: Some(format!("Medicine created successfully with name: {}", name)),
      medicine: Some(MedicineBody::from(&created)),
    }),
  ))
}

/// `PATCH /medicines/{name}`
pub async fn update(
  State(store): State<Arc<Store>>,
  Path(name): Path<String>,
  payload: Result<Json<UpdateMedicine>, JsonRejection>,
) -> Result<Json<MedicineResponse>, ApiError> {
  let name = validate_name(&name)?;
  let Json(body) = payload?;
  let price = validate_price(body.price)?;

  if !store.update_price(&name, price).await? {
    info!("Medicine '{}' not found", name);
    return Err(ApiError::NotFound);
  }

  let updated = store.find_by_name(&name).await?.ok_or(ApiError::NotFound)?;
  info!("Updated price of '{}' to {}", name, price);

  Ok(Json(MedicineResponse {
    code: StatusCode::OK.as_u16(),
    message: Some(format!("Medicine updated successfully with name: {}", name)),
    medicine: Some(MedicineBody::from(&updated)),
  }))
}

/// `DELETE /medicines/{name}`
pub async fn remove(
  State(store): State<Arc<Store>>,
  Path(name): Path<String>,
) -> Result<Json<MedicineResponse>, ApiError> {
  let name = validate_name(&name)?;

  if !store.remove(&name).await? {
    info!("Medicine '{}' not found", name);
    return Err(ApiError::NotFound);
  }
  info!("Deleted medicine '{}'", name);

  Ok(Json(MedicineResponse {
    code: StatusCode::OK.as_u16(),
    message: Some(format!("Medicine deleted successfully with name: {}", name)),
    medicine: None,
  }))
}

/// `GET /average`
pub async fn average(State(store): State<Arc<Store>>) -> Result<Json<AverageResponse>, ApiError> {
  let doc = store.load_all().await?;
  let average = average_price(&doc.medicines)
    .ok_or_else(|| ApiError::BadRequest("No medicines with prices found".to_string()))?;
  if !average.is_finite() {
    return Err(ApiError::Internal(format!("average price is not finite: {}", average)));
  }

  Ok(Json(AverageResponse {
    code: StatusCode::OK.as_u16(),
    average_price: average,
  }))
}

/// Any path or method with no route
pub async fn fallback() -> ApiError {
  ApiError::NoRoute
}

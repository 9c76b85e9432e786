//! API error types with JSON responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::store::StoreError;
use crate::validate::ValidationError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error response body: `{ "code": 404, "error": "Medicine not found" }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub code: u16,
  pub error: String,
}

/// Request failures with their HTTP status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),
  #[error("Medicine not found")]
  NotFound,
  #[error("Not found")]
  NoRoute,
  #[error("Medicine already exists")]
  Conflict,
  #[error("{0}")]
  Unprocessable(String),
  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::Conflict => StatusCode::BAD_REQUEST,
      ApiError::NotFound | ApiError::NoRoute => StatusCode::NOT_FOUND,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let error = match &self {
      ApiError::Internal(detail) => {
        tracing::error!(detail = %detail, "request failed");
        INTERNAL_MESSAGE.to_string()
      }
      other => other.to_string(),
    };

    let body = ErrorBody {
      code: status.as_u16(),
      error,
    };
    (status, Json(body)).into_response()
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    ApiError::Internal(err.to_string())
  }
}

impl From<ValidationError> for ApiError {
  fn from(err: ValidationError) -> Self {
    match err {
      ValidationError::EmptyName => ApiError::BadRequest(err.to_string()),
      ValidationError::InvalidPrice => ApiError::Unprocessable(err.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Unprocessable(rejection.body_text())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::body::to_bytes;

  async fn body_json(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
  }

  #[tokio::test]
  async fn test_not_found_returns_404() {
    let response = ApiError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], 404);
    assert_eq!(json["error"], "Medicine not found");
  }

  #[tokio::test]
  async fn test_no_route_returns_404() {
    let response = ApiError::NoRoute.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
  }

  #[tokio::test]
  async fn test_conflict_returns_400() {
    let response = ApiError::Conflict.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Medicine already exists");
  }

  #[tokio::test]
  async fn test_internal_hides_detail() {
    let response = ApiError::Internal("disk on fire at /var/data.json".into()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], 500);
    assert_eq!(json["error"], "Internal server error");
  }

  #[test]
  fn test_validation_error_mapping() {
    assert_eq!(
      ApiError::from(ValidationError::EmptyName).status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::from(ValidationError::InvalidPrice).status(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
  }

  #[test]
  fn test_store_error_is_internal() {
    let err = StoreError::Io {
      path: "data.json".into(),
      source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
  }
}

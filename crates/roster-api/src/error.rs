//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unavailable: {0}")]
  Unavailable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a backend error onto an HTTP-shaped one, by walking the source
  /// chain for the domain error it wraps: validation becomes 400, a missing
  /// record 404, a listener veto 409, anything else 500.
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    if let Some(classified) = classify(&e) {
      return classified;
    }
    ApiError::Store(Box::new(e))
  }
}

fn classify(err: &(dyn std::error::Error + 'static)) -> Option<ApiError> {
  let mut current = Some(err);
  while let Some(e) = current {
    if let Some(core) = e.downcast_ref::<CoreError>() {
      return match core {
        CoreError::MissingName | CoreError::MissingLookupKey => {
          Some(ApiError::BadRequest(core.to_string()))
        }
        CoreError::ContactNotFound(_) => {
          Some(ApiError::NotFound(core.to_string()))
        }
        CoreError::ListenerAbort { .. } => {
          Some(ApiError::Conflict(core.to_string()))
        }
        _ => None,
      };
    }
    current = e.source();
  }
  None
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

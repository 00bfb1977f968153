//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{"error": "<message>"}`. Internal failures carry a
//! fixed public message; the underlying error is logged, never returned.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{message}")]
  Internal {
    /// The text sent to the client.
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn internal(
    message: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    ApiError::Internal { message, source: Box::new(source) }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Internal { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

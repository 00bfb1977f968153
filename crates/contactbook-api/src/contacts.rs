//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | All contacts, newest first |
//! | `POST` | `/contacts` | Body: [`CreateBody`]; returns 201 + stored contact |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use contactbook_core::{
  contact::{Contact, NewContact},
  store::{ContactStore, StoreError as _},
};
use serde::Deserialize;

use crate::error::ApiError;

pub const MISSING_FIELDS: &str = "Name, email, and phone are required";
pub const LIST_FAILED: &str = "Failed to fetch contacts";
pub const SERVER_ERROR: &str = "Server error";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .list()
    .await
    .map_err(|e| ApiError::internal(LIST_FAILED, e))?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /contacts`. Every field is optional at the
/// decoding stage so that a missing field yields the presence-check message
/// rather than a decoder error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub message: Option<String>,
}

impl CreateBody {
  /// Presence check: `name`, `email` and `phone` must be present and
  /// non-empty. Whitespace-only values pass here and are rejected by the
  /// store's validation instead.
  fn into_candidate(self) -> Option<NewContact> {
    let present = |v: Option<String>| v.filter(|s| !s.is_empty());
    Some(NewContact {
      name:    present(self.name)?,
      email:   present(self.email)?,
      phone:   present(self.phone)?,
      message: self.message.unwrap_or_default(),
    })
  }
}

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  let candidate = body
    .into_candidate()
    .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_owned()))?;

  match store.create(candidate).await {
    Ok(contact) => Ok((StatusCode::CREATED, Json(contact))),
    Err(e) => match e.validation() {
      Some(errs) => Err(ApiError::BadRequest(errs.to_string())),
      None => Err(ApiError::internal(SERVER_ERROR, e)),
    },
  }
}

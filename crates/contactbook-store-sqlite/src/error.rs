//! Error type for `contactbook-store-sqlite`.

use contactbook_core::{ValidationErrors, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The candidate failed schema validation; nothing was written.
  #[error("{0}")]
  Validation(#[from] ValidationErrors),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn validation(&self) -> Option<&ValidationErrors> {
    match self {
      Error::Validation(errs) => Some(errs),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

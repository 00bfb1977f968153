//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `contactbook-store-sqlite`). Higher layers (`contactbook-api`) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, NewContact},
  error::ValidationErrors,
};

/// Implemented by every backend error type so callers can tell a schema
/// rejection apart from an infrastructure failure without knowing the
/// backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The field-level failures, if this error is a validation failure.
  fn validation(&self) -> Option<&ValidationErrors>;
}

impl StoreError for ValidationErrors {
  fn validation(&self) -> Option<&ValidationErrors> { Some(self) }
}

/// Abstraction over a contact store backend.
///
/// Contacts are write-once: there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Validate `candidate`, assign an identifier and creation timestamp, and
  /// persist it. Validation failures are reported through
  /// [`StoreError::validation`].
  fn create(
    &self,
    candidate: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Every stored contact, newest first.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;
}

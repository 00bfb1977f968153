//! JSON REST API for contactbook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`contactbook_core::store::ContactStore`]. Transport concerns (CORS,
//! tracing, listening) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", contactbook_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use contactbook_core::store::ContactStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The store handle is created once by the caller and shared by every request.
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

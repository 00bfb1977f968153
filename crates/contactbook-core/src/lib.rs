//! Core types and trait definitions for the contactbook store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, API, server and client crates all depend on it.

pub mod contact;
pub mod error;
pub mod store;

pub use error::{Field, FieldError, ValidationErrors};

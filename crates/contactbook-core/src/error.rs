//! Validation error types shared by the store and the form client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated contact field. `message` is never validated, so it has no
/// variant here.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
  Name,
  Email,
  Phone,
}

impl Field {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Phone => "phone",
    }
  }
}

/// A single failing field and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
  /// The field was empty after trimming surrounding whitespace.
  #[error("{}", required_message(.0))]
  Required(Field),

  /// The email did not match `non-whitespace@non-whitespace.non-whitespace`.
  #[error("Please enter a valid email")]
  InvalidEmail,
}

fn required_message(field: &Field) -> &'static str {
  match field {
    Field::Name => "Name is required",
    Field::Email => "Email is required",
    Field::Phone => "Phone is required",
  }
}

impl FieldError {
  pub fn field(&self) -> Field {
    match self {
      Self::Required(field) => *field,
      Self::InvalidEmail => Field::Email,
    }
  }

  /// Human-readable message, e.g. `"Name is required"`.
  pub fn message(&self) -> String { self.to_string() }
}

/// Every field-level failure found while validating one candidate, in schema
/// order (name, email, phone). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  /// Returns `None` when `errors` is empty.
  pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
    if errors.is_empty() { None } else { Some(Self(errors)) }
  }

  pub fn errors(&self) -> &[FieldError] { &self.0 }

  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
    self.0.iter().map(FieldError::field)
  }

  pub fn contains(&self, field: Field) -> bool {
    self.fields().any(|f| f == field)
  }
}

/// Displays as every message joined with `", "`, which is exactly the text the
/// API returns to clients.
impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, err) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{err}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_are_joined_in_order() {
    let errs = ValidationErrors::from_errors(vec![
      FieldError::Required(Field::Name),
      FieldError::InvalidEmail,
      FieldError::Required(Field::Phone),
    ])
    .unwrap();
    assert_eq!(
      errs.to_string(),
      "Name is required, Please enter a valid email, Phone is required"
    );
    assert!(errs.contains(Field::Email));
  }

  #[test]
  fn empty_error_list_is_not_a_failure() {
    assert!(ValidationErrors::from_errors(Vec::new()).is_none());
  }
}

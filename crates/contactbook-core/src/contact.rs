//! Contact types: the persisted record and the candidate a caller submits.
//!
//! A contact is immutable once created. There is no update or delete; the
//! `updated_at` timestamp exists for wire compatibility and always equals
//! `created_at`.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Field, FieldError, ValidationErrors};

// ─── Email pattern ───────────────────────────────────────────────────────────

/// `non-whitespace@non-whitespace.non-whitespace`, anchored at both ends.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is valid"));

/// Whether `email` matches [`EMAIL_PATTERN`] as given. Callers decide whether
/// to trim first.
pub fn is_valid_email(email: &str) -> bool { EMAIL_RE.is_match(email) }

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact, serialised in the document-store shape clients expect:
/// `{ "_id", "name", "email", "phone", "message", "createdAt", "updatedAt" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  #[serde(rename = "_id")]
  pub id:         Uuid,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  #[serde(default)]
  pub message:    String,
  /// Store-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::create`]. Identifier and timestamps
/// are always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  #[serde(default)]
  pub message: String,
}

/// A [`NewContact`] that passed validation, with `name`, `email` and `phone`
/// trimmed. Only [`NewContact::validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
  name:    String,
  email:   String,
  phone:   String,
  message: String,
}

impl ValidContact {
  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn phone(&self) -> &str { &self.phone }

  pub fn message(&self) -> &str { &self.message }

  /// Stamp the validated fields into a full [`Contact`].
  pub fn into_contact(self, id: Uuid, created_at: DateTime<Utc>) -> Contact {
    Contact {
      id,
      name: self.name,
      email: self.email,
      phone: self.phone,
      message: self.message,
      created_at,
      updated_at: created_at,
    }
  }
}

impl NewContact {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    phone: impl Into<String>,
  ) -> Self {
    Self {
      name:    name.into(),
      email:   email.into(),
      phone:   phone.into(),
      message: String::new(),
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = message.into();
    self
  }

  /// Normalise and check the candidate against the contact schema.
  ///
  /// `name`, `email` and `phone` are trimmed; `message` is kept verbatim. On
  /// failure every offending field is reported, in schema order.
  pub fn validate(self) -> Result<ValidContact, ValidationErrors> {
    let name = self.name.trim().to_owned();
    let email = self.email.trim().to_owned();
    let phone = self.phone.trim().to_owned();

    let mut errors = Vec::new();
    if name.is_empty() {
      errors.push(FieldError::Required(Field::Name));
    }
    if email.is_empty() {
      errors.push(FieldError::Required(Field::Email));
    } else if !is_valid_email(&email) {
      errors.push(FieldError::InvalidEmail);
    }
    if phone.is_empty() {
      errors.push(FieldError::Required(Field::Phone));
    }

    match ValidationErrors::from_errors(errors) {
      Some(errs) => Err(errs),
      None => Ok(ValidContact { name, email, phone, message: self.message }),
    }
  }
}

//! The contact form: field values, client-side validation, and submit
//! eligibility.
//!
//! Validation mirrors the store's rules and reuses its messages, but checks
//! the email pattern against the value exactly as typed.

use std::collections::BTreeMap;

use contactbook_core::{
  Field, FieldError,
  contact::{NewContact, is_valid_email},
};

/// One input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
  Name,
  Email,
  Phone,
  Message,
}

impl FormField {
  /// Display and tab order.
  pub const ALL: [FormField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

  pub fn placeholder(self) -> &'static str {
    match self {
      Self::Name => "Full Name",
      Self::Email => "Email Address",
      Self::Phone => "Phone Number",
      Self::Message => "Message (Optional)",
    }
  }
}

impl From<Field> for FormField {
  fn from(field: Field) -> Self {
    match field {
      Field::Name => Self::Name,
      Field::Email => Self::Email,
      Field::Phone => Self::Phone,
    }
  }
}

/// Field → message for every field that failed validation. A field absent
/// from the map passed.
pub type FormErrors = BTreeMap<FormField, String>;

/// Current values of the four inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub message: String,
}

impl ContactForm {
  pub fn value(&self, field: FormField) -> &str {
    match field {
      FormField::Name => &self.name,
      FormField::Email => &self.email,
      FormField::Phone => &self.phone,
      FormField::Message => &self.message,
    }
  }

  pub fn value_mut(&mut self, field: FormField) -> &mut String {
    match field {
      FormField::Name => &mut self.name,
      FormField::Email => &mut self.email,
      FormField::Phone => &mut self.phone,
      FormField::Message => &mut self.message,
    }
  }

  /// Run client-side validation over every field.
  pub fn validate(&self) -> FormErrors {
    let mut errors = Vec::new();
    if self.name.trim().is_empty() {
      errors.push(FieldError::Required(Field::Name));
    }
    if self.email.trim().is_empty() {
      errors.push(FieldError::Required(Field::Email));
    } else if !is_valid_email(&self.email) {
      errors.push(FieldError::InvalidEmail);
    }
    if self.phone.trim().is_empty() {
      errors.push(FieldError::Required(Field::Phone));
    }

    errors
      .into_iter()
      .map(|e| (FormField::from(e.field()), e.message()))
      .collect()
  }

  /// Whether the submit button is enabled. Independent of the error map.
  pub fn is_submittable(&self) -> bool {
    !self.name.trim().is_empty()
      && !self.phone.trim().is_empty()
      && is_valid_email(&self.email)
  }

  /// The request body for `POST /api/contacts`: the values exactly as typed.
  pub fn to_new_contact(&self) -> NewContact {
    NewContact {
      name:    self.name.clone(),
      email:   self.email.clone(),
      phone:   self.phone.clone(),
      message: self.message.clone(),
    }
  }

  pub fn clear(&mut self) { *self = Self::default(); }
}

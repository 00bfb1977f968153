//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use contactbook_core::{
  contact::{Contact, NewContact},
  store::ContactStore,
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{RawContact, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a store from a connection string: `sqlite://path`, `sqlite:path`,
  /// a bare filesystem path, or `:memory:`.
  pub async fn connect(url: &str) -> Result<Self> {
    let path = database_path(url);
    if path == ":memory:" {
      Self::open_in_memory().await
    } else {
      Self::open(path.to_owned()).await
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_contact(&self, contact: &Contact) -> Result<()> {
    let id_str      = encode_uuid(contact.id);
    let name        = contact.name.clone();
    let email       = contact.email.clone();
    let phone       = contact.phone.clone();
    let message     = contact.message.clone();
    let created_str = encode_dt(contact.created_at);
    let updated_str = encode_dt(contact.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, name, email, phone, message, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            name,
            email,
            phone,
            message,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Strip an optional `sqlite:` / `sqlite://` scheme from a connection string.
fn database_path(url: &str) -> &str {
  url
    .strip_prefix("sqlite://")
    .or_else(|| url.strip_prefix("sqlite:"))
    .unwrap_or(url)
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, candidate: NewContact) -> Result<Contact> {
    let valid = candidate.validate()?;

    // Stored timestamps carry millisecond precision; truncate up front so the
    // returned value equals what a later `list` reads back.
    let contact = valid.into_contact(Uuid::new_v4(), Utc::now().trunc_subsecs(3));

    self.insert_contact(&contact).await?;
    tracing::debug!(contact_id = %contact.id, "contact created");
    Ok(contact)
  }

  async fn list(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM contacts ORDER BY created_at DESC, rowid DESC",
          RawContact::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

#[cfg(test)]
mod path_tests {
  use super::database_path;

  #[test]
  fn connection_string_schemes_are_stripped() {
    assert_eq!(database_path("sqlite://data/contacts.db"), "data/contacts.db");
    assert_eq!(database_path("sqlite:contacts.db"), "contacts.db");
    assert_eq!(database_path("sqlite::memory:"), ":memory:");
    assert_eq!(database_path("/var/lib/contacts.db"), "/var/lib/contacts.db");
  }
}

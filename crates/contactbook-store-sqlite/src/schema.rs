//! SQL schema for the contactbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Contacts are write-once.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (length(trim(name))  > 0),
    email       TEXT NOT NULL CHECK (length(trim(email)) > 0),
    phone       TEXT NOT NULL CHECK (length(trim(phone)) > 0),
    message     TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed millisecond width
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);

PRAGMA user_version = 1;
";

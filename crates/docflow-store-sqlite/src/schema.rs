//! SQL schema for the Docflow SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Timestamps are RFC 3339 UTC strings. Length limits and the delivery
/// method set are enforced here, so violations surface as database errors.
/// References to `employees` use the default NO ACTION policy: an employee
/// cannot be deleted while a memo, report or order still points at it.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name   TEXT NOT NULL CHECK (length(full_name) <= 100),
    position    TEXT NOT NULL CHECK (length(position) <= 100),
    email       TEXT NOT NULL UNIQUE CHECK (length(email) <= 100),
    phone       TEXT CHECK (length(phone) <= 20),
    note        TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS incoming_documents (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id   TEXT NOT NULL CHECK (length(sender_id) <= 200),   -- free text, not a key
    subject     TEXT NOT NULL CHECK (length(subject) <= 200),
    resolution  TEXT,
    note        TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS outgoing_documents (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient_id    TEXT NOT NULL CHECK (length(recipient_id) <= 200),
    subject         TEXT NOT NULL CHECK (length(subject) <= 200),
    delivery_method TEXT NOT NULL CHECK (delivery_method IN ('email', 'mail')),
    note            TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS memos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id   INTEGER NOT NULL REFERENCES employees(id),
    content     TEXT NOT NULL,
    note        TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- The note is the body of the report, hence NOT NULL.
CREATE TABLE IF NOT EXISTS reports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id   INTEGER NOT NULL REFERENCES employees(id),
    note        TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    content     TEXT NOT NULL,
    signer_id   INTEGER NOT NULL REFERENCES employees(id),
    note        TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS memos_author_idx   ON memos(author_id);
CREATE INDEX IF NOT EXISTS reports_author_idx ON reports(author_id);
CREATE INDEX IF NOT EXISTS orders_signer_idx  ON orders(signer_id);

PRAGMA user_version = 1;
";

//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. The delivery method is
//! stored as its lowercase name.

use chrono::{DateTime, Utc};
use docflow_core::{employee::Employee, outgoing::DeliveryMethod};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DeliveryMethod
// ───────────────────────────────────────────────────────────

pub fn decode_delivery_method(s: &str) -> Result<DeliveryMethod> {
  Ok(s.parse()?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `employees` row.
///
/// Memos, reports and orders join the employee they reference, so the
/// columns are read starting at an arbitrary offset.
pub struct RawEmployee {
  pub id:         i64,
  pub full_name:  String,
  pub position:   String,
  pub email:      String,
  pub phone:      Option<String>,
  pub note:       Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawEmployee {
  /// Read the eight `employees` columns starting at column `offset`.
  pub fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(offset)?,
      full_name:  row.get(offset + 1)?,
      position:   row.get(offset + 2)?,
      email:      row.get(offset + 3)?,
      phone:      row.get(offset + 4)?,
      note:       row.get(offset + 5)?,
      created_at: row.get(offset + 6)?,
      updated_at: row.get(offset + 7)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:         self.id,
      full_name:  self.full_name,
      position:   self.position,
      email:      self.email,
      phone:      self.phone,
      note:       self.note,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

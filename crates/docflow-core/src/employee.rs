//! Employees: the identity records memos, reports and orders point at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  patch::nullable,
  record::{Record, RecordId},
};

// ─── Employee ────────────────────────────────────────────────────────────────

/// A member of the organisation. `email` is unique across employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub id:         RecordId,
  pub full_name:  String,
  pub position:   String,
  pub email:      String,
  pub phone:      Option<String>,
  pub note:       Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Body of `POST /employees/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
  pub full_name: String,
  pub position:  String,
  pub email:     String,
  pub phone:     Option<String>,
  pub note:      Option<String>,
}

impl NewEmployee {
  /// Convenience constructor with the optional fields left empty.
  pub fn new(
    full_name: impl Into<String>,
    position: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      position:  position.into(),
      email:     email.into(),
      phone:     None,
      note:      None,
    }
  }
}

/// Body of `PUT /employees/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeReplace {
  pub full_name: Option<String>,
  pub position:  Option<String>,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub note:      Option<String>,
}

/// Body of `PATCH /employees/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
  pub full_name: Option<String>,
  pub position:  Option<String>,
  pub email:     Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub phone:     Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub note:      Option<Option<String>>,
}

// ─── Record impl ─────────────────────────────────────────────────────────────

impl Record for Employee {
  type New = NewEmployee;
  type Replace = EmployeeReplace;
  type Patch = EmployeePatch;

  const RESOURCE: &'static str = "employees";
  const LABEL: &'static str = "Employee";
  const TAG: &'static str = "Employees";
  const DESCRIPTION: &'static str = "Employees of the organisation";

  fn id(&self) -> RecordId { self.id }

  fn apply_patch(&mut self, patch: EmployeePatch) -> Result<()> {
    if let Some(full_name) = patch.full_name {
      self.full_name = full_name;
    }
    if let Some(position) = patch.position {
      self.position = position;
    }
    if let Some(email) = patch.email {
      self.email = email;
    }
    if let Some(phone) = patch.phone {
      self.phone = phone;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

//! Reports filed by employees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  employee::Employee,
  record::{Record, RecordId},
};

/// An employee report. The body of the report is its `note`, which is
/// therefore required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
  pub id:         RecordId,
  pub author_id:  RecordId,
  pub note:       String,
  pub author:     Employee,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReport {
  pub author_id: RecordId,
  pub note:      String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportReplace {
  pub author_id: Option<RecordId>,
  pub note:      Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportPatch {
  pub author_id: Option<RecordId>,
  pub note:      Option<String>,
}

impl Record for Report {
  type New = NewReport;
  type Replace = ReportReplace;
  type Patch = ReportPatch;

  const RESOURCE: &'static str = "reports";
  const LABEL: &'static str = "Report";
  const TAG: &'static str = "Employee reports";
  const DESCRIPTION: &'static str = "Reports filed by employees";

  fn id(&self) -> RecordId { self.id }

  fn apply_patch(&mut self, patch: ReportPatch) -> Result<()> {
    if let Some(author_id) = patch.author_id {
      self.author_id = author_id;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

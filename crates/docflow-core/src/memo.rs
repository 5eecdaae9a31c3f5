//! Internal memos written by an employee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  employee::Employee,
  patch::nullable,
  record::{Record, RecordId},
};

/// An internal memo. The author is embedded on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
  pub id:         RecordId,
  pub author_id:  RecordId,
  pub content:    String,
  pub note:       Option<String>,
  pub author:     Employee,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMemo {
  pub author_id: RecordId,
  pub content:   String,
  pub note:      Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoReplace {
  pub author_id: Option<RecordId>,
  pub content:   Option<String>,
  pub note:      Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoPatch {
  pub author_id: Option<RecordId>,
  pub content:   Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub note:      Option<Option<String>>,
}

impl Record for Memo {
  type New = NewMemo;
  type Replace = MemoReplace;
  type Patch = MemoPatch;

  const RESOURCE: &'static str = "memos";
  const LABEL: &'static str = "Memo";
  const TAG: &'static str = "Memos";
  const DESCRIPTION: &'static str = "Internal memos of the organisation";

  fn id(&self) -> RecordId { self.id }

  /// Changing `author_id` leaves the embedded `author` stale until the
  /// record is saved and read back.
  fn apply_patch(&mut self, patch: MemoPatch) -> Result<()> {
    if let Some(author_id) = patch.author_id {
      self.author_id = author_id;
    }
    if let Some(content) = patch.content {
      self.content = content;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

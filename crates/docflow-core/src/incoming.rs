//! Incoming correspondence received from outside the organisation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  patch::nullable,
  record::{Record, RecordId},
};

/// A document received from an external sender.
///
/// `sender_id` is free text identifying the sender; it is not a reference to
/// any stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingDocument {
  pub id:         RecordId,
  pub sender_id:  String,
  pub subject:    String,
  /// Resolution written on the document by management.
  pub resolution: Option<String>,
  pub note:       Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewIncomingDocument {
  pub sender_id:  String,
  pub subject:    String,
  pub resolution: Option<String>,
  pub note:       Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingDocumentReplace {
  pub sender_id:  Option<String>,
  pub subject:    Option<String>,
  pub resolution: Option<String>,
  pub note:       Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingDocumentPatch {
  pub sender_id:  Option<String>,
  pub subject:    Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub resolution: Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub note:       Option<Option<String>>,
}

impl Record for IncomingDocument {
  type New = NewIncomingDocument;
  type Replace = IncomingDocumentReplace;
  type Patch = IncomingDocumentPatch;

  const RESOURCE: &'static str = "incoming";
  const LABEL: &'static str = "Incoming document";
  const TAG: &'static str = "Incoming documents";
  const DESCRIPTION: &'static str = "Documents received by the organisation";

  fn id(&self) -> RecordId { self.id }

  fn apply_patch(&mut self, patch: IncomingDocumentPatch) -> Result<()> {
    if let Some(sender_id) = patch.sender_id {
      self.sender_id = sender_id;
    }
    if let Some(subject) = patch.subject {
      self.subject = subject;
    }
    if let Some(resolution) = patch.resolution {
      self.resolution = resolution;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

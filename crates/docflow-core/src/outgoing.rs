//! Outgoing correspondence and its delivery method.
//!
//! The delivery method is the only enumerated value in the system. Payloads
//! carry it as a raw string so that an unknown value is reported as
//! [`Error::InvalidDeliveryMethod`] instead of a generic parse failure.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  patch::nullable,
  record::{Record, RecordId},
};

// ─── DeliveryMethod ──────────────────────────────────────────────────────────

/// How an outgoing document is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
  Email,
  Mail,
}

impl DeliveryMethod {
  /// The string stored in the `delivery_method` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Mail => "mail",
    }
  }
}

impl FromStr for DeliveryMethod {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "email" => Ok(Self::Email),
      "mail" => Ok(Self::Mail),
      other => Err(Error::InvalidDeliveryMethod(other.to_owned())),
    }
  }
}

impl fmt::Display for DeliveryMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── OutgoingDocument ────────────────────────────────────────────────────────

/// A document sent to an external recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingDocument {
  pub id:              RecordId,
  /// Free-text identifier of the recipient.
  pub recipient_id:    String,
  pub subject:         String,
  pub delivery_method: DeliveryMethod,
  pub note:            Option<String>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOutgoingDocument {
  pub recipient_id:    String,
  pub subject:         String,
  /// Must be `"email"` or `"mail"`.
  pub delivery_method: String,
  pub note:            Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutgoingDocumentReplace {
  pub recipient_id:    Option<String>,
  pub subject:         Option<String>,
  pub delivery_method: Option<String>,
  pub note:            Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutgoingDocumentPatch {
  pub recipient_id:    Option<String>,
  pub subject:         Option<String>,
  pub delivery_method: Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub note:            Option<Option<String>>,
}

impl Record for OutgoingDocument {
  type New = NewOutgoingDocument;
  type Replace = OutgoingDocumentReplace;
  type Patch = OutgoingDocumentPatch;

  const RESOURCE: &'static str = "outgoing";
  const LABEL: &'static str = "Outgoing document";
  const TAG: &'static str = "Outgoing documents";
  const DESCRIPTION: &'static str = "Documents sent by the organisation";

  fn id(&self) -> RecordId { self.id }

  fn validate_new(input: &NewOutgoingDocument) -> Result<()> {
    input.delivery_method.parse::<DeliveryMethod>()?;
    Ok(())
  }

  fn validate_replace(input: &OutgoingDocumentReplace) -> Result<()> {
    if let Some(method) = &input.delivery_method {
      method.parse::<DeliveryMethod>()?;
    }
    Ok(())
  }

  fn apply_patch(&mut self, patch: OutgoingDocumentPatch) -> Result<()> {
    let delivery_method = patch
      .delivery_method
      .as_deref()
      .map(str::parse::<DeliveryMethod>)
      .transpose()?;

    if let Some(recipient_id) = patch.recipient_id {
      self.recipient_id = recipient_id;
    }
    if let Some(subject) = patch.subject {
      self.subject = subject;
    }
    if let Some(method) = delivery_method {
      self.delivery_method = method;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

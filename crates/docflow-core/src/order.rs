//! Formal orders signed by an employee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  employee::Employee,
  patch::nullable,
  record::{Record, RecordId},
};

/// A signed order. The signer is embedded on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id:         RecordId,
  pub content:    String,
  pub signer_id:  RecordId,
  pub note:       Option<String>,
  pub signer:     Employee,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
  pub content:   String,
  pub signer_id: RecordId,
  pub note:      Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderReplace {
  pub content:   Option<String>,
  pub signer_id: Option<RecordId>,
  pub note:      Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
  pub content:   Option<String>,
  pub signer_id: Option<RecordId>,
  #[serde(default, deserialize_with = "nullable")]
  pub note:      Option<Option<String>>,
}

impl Record for Order {
  type New = NewOrder;
  type Replace = OrderReplace;
  type Patch = OrderPatch;

  const RESOURCE: &'static str = "orders";
  const LABEL: &'static str = "Order";
  const TAG: &'static str = "Orders";
  const DESCRIPTION: &'static str = "Orders issued by the organisation";

  fn id(&self) -> RecordId { self.id }

  fn apply_patch(&mut self, patch: OrderPatch) -> Result<()> {
    if let Some(content) = patch.content {
      self.content = content;
    }
    if let Some(signer_id) = patch.signer_id {
      self.signer_id = signer_id;
    }
    if let Some(note) = patch.note {
      self.note = note;
    }
    Ok(())
  }
}

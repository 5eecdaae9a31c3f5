//! [`Table`]: the SQL mapping of each [`Record`] type.
//!
//! Each impl lists the writable columns of its table in bind order and knows
//! how to turn payloads and records into values for those columns. `id`,
//! `created_at` and `updated_at` are managed by the store and never appear in
//! [`Table::COLUMNS`].

use docflow_core::{
  Record,
  employee::{Employee, EmployeeReplace, NewEmployee},
  incoming::{IncomingDocument, IncomingDocumentReplace, NewIncomingDocument},
  memo::{Memo, MemoReplace, NewMemo},
  order::{NewOrder, Order, OrderReplace},
  outgoing::{NewOutgoingDocument, OutgoingDocument, OutgoingDocumentReplace},
  report::{NewReport, Report, ReportReplace},
};
use rusqlite::{Row, types::Value};

use crate::{
  Result,
  encode::{RawEmployee, decode_delivery_method, decode_dt},
};

/// SQL mapping for a record type.
pub trait Table: Record {
  const TABLE: &'static str;
  /// Writable columns, in bind order.
  const COLUMNS: &'static [&'static str];
  /// A `SELECT ... FROM <table> t [JOIN ...]` yielding one row per record.
  /// The record's own table is aliased `t`.
  const SELECT: &'static str;

  /// Row values as read inside the database thread, decoded afterwards.
  type Raw: Send + 'static;

  fn new_values(input: Self::New) -> Vec<Value>;
  /// Absent payload fields become NULL.
  fn replace_values(input: Self::Replace) -> Vec<Value>;
  fn record_values(&self) -> Vec<Value>;

  fn read_row(row: &Row<'_>) -> rusqlite::Result<Self::Raw>;
  fn decode(raw: Self::Raw) -> Result<Self>;
}

// ─── Employee ────────────────────────────────────────────────────────────────

impl Table for Employee {
  const TABLE: &'static str = "employees";
  const COLUMNS: &'static [&'static str] =
    &["full_name", "position", "email", "phone", "note"];
  const SELECT: &'static str = "SELECT t.id, t.full_name, t.position, t.email, \
     t.phone, t.note, t.created_at, t.updated_at FROM employees t";

  type Raw = RawEmployee;

  fn new_values(input: NewEmployee) -> Vec<Value> {
    vec![
      input.full_name.into(),
      input.position.into(),
      input.email.into(),
      input.phone.into(),
      input.note.into(),
    ]
  }

  fn replace_values(input: EmployeeReplace) -> Vec<Value> {
    vec![
      input.full_name.into(),
      input.position.into(),
      input.email.into(),
      input.phone.into(),
      input.note.into(),
    ]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![
      self.full_name.clone().into(),
      self.position.clone().into(),
      self.email.clone().into(),
      self.phone.clone().into(),
      self.note.clone().into(),
    ]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEmployee> {
    RawEmployee::read(row, 0)
  }

  fn decode(raw: RawEmployee) -> Result<Self> { raw.into_employee() }
}

// ─── IncomingDocument ────────────────────────────────────────────────────────

pub struct RawIncomingDocument {
  id:         i64,
  sender_id:  String,
  subject:    String,
  resolution: Option<String>,
  note:       Option<String>,
  created_at: String,
  updated_at: String,
}

impl Table for IncomingDocument {
  const TABLE: &'static str = "incoming_documents";
  const COLUMNS: &'static [&'static str] =
    &["sender_id", "subject", "resolution", "note"];
  const SELECT: &'static str = "SELECT t.id, t.sender_id, t.subject, \
     t.resolution, t.note, t.created_at, t.updated_at \
     FROM incoming_documents t";

  type Raw = RawIncomingDocument;

  fn new_values(input: NewIncomingDocument) -> Vec<Value> {
    vec![
      input.sender_id.into(),
      input.subject.into(),
      input.resolution.into(),
      input.note.into(),
    ]
  }

  fn replace_values(input: IncomingDocumentReplace) -> Vec<Value> {
    vec![
      input.sender_id.into(),
      input.subject.into(),
      input.resolution.into(),
      input.note.into(),
    ]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![
      self.sender_id.clone().into(),
      self.subject.clone().into(),
      self.resolution.clone().into(),
      self.note.clone().into(),
    ]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawIncomingDocument> {
    Ok(RawIncomingDocument {
      id:         row.get(0)?,
      sender_id:  row.get(1)?,
      subject:    row.get(2)?,
      resolution: row.get(3)?,
      note:       row.get(4)?,
      created_at: row.get(5)?,
      updated_at: row.get(6)?,
    })
  }

  fn decode(raw: RawIncomingDocument) -> Result<Self> {
    Ok(IncomingDocument {
      id:         raw.id,
      sender_id:  raw.sender_id,
      subject:    raw.subject,
      resolution: raw.resolution,
      note:       raw.note,
      created_at: decode_dt(&raw.created_at)?,
      updated_at: decode_dt(&raw.updated_at)?,
    })
  }
}

// ─── OutgoingDocument ────────────────────────────────────────────────────────

pub struct RawOutgoingDocument {
  id:              i64,
  recipient_id:    String,
  subject:         String,
  delivery_method: String,
  note:            Option<String>,
  created_at:      String,
  updated_at:      String,
}

impl Table for OutgoingDocument {
  const TABLE: &'static str = "outgoing_documents";
  const COLUMNS: &'static [&'static str] =
    &["recipient_id", "subject", "delivery_method", "note"];
  const SELECT: &'static str = "SELECT t.id, t.recipient_id, t.subject, \
     t.delivery_method, t.note, t.created_at, t.updated_at \
     FROM outgoing_documents t";

  type Raw = RawOutgoingDocument;

  // The delivery method has already been validated by the caller; the
  // column CHECK constraint rejects anything that slips through.
  fn new_values(input: NewOutgoingDocument) -> Vec<Value> {
    vec![
      input.recipient_id.into(),
      input.subject.into(),
      input.delivery_method.into(),
      input.note.into(),
    ]
  }

  fn replace_values(input: OutgoingDocumentReplace) -> Vec<Value> {
    vec![
      input.recipient_id.into(),
      input.subject.into(),
      input.delivery_method.into(),
      input.note.into(),
    ]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![
      self.recipient_id.clone().into(),
      self.subject.clone().into(),
      self.delivery_method.as_str().to_owned().into(),
      self.note.clone().into(),
    ]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawOutgoingDocument> {
    Ok(RawOutgoingDocument {
      id:              row.get(0)?,
      recipient_id:    row.get(1)?,
      subject:         row.get(2)?,
      delivery_method: row.get(3)?,
      note:            row.get(4)?,
      created_at:      row.get(5)?,
      updated_at:      row.get(6)?,
    })
  }

  fn decode(raw: RawOutgoingDocument) -> Result<Self> {
    Ok(OutgoingDocument {
      id:              raw.id,
      recipient_id:    raw.recipient_id,
      subject:         raw.subject,
      delivery_method: decode_delivery_method(&raw.delivery_method)?,
      note:            raw.note,
      created_at:      decode_dt(&raw.created_at)?,
      updated_at:      decode_dt(&raw.updated_at)?,
    })
  }
}

// ─── Memo ────────────────────────────────────────────────────────────────────

pub struct RawMemo {
  id:         i64,
  author_id:  i64,
  content:    String,
  note:       Option<String>,
  created_at: String,
  updated_at: String,
  author:     RawEmployee,
}

impl Table for Memo {
  const TABLE: &'static str = "memos";
  const COLUMNS: &'static [&'static str] = &["author_id", "content", "note"];
  const SELECT: &'static str = "SELECT t.id, t.author_id, t.content, t.note, \
     t.created_at, t.updated_at, a.id, a.full_name, a.position, a.email, \
     a.phone, a.note, a.created_at, a.updated_at \
     FROM memos t JOIN employees a ON a.id = t.author_id";

  type Raw = RawMemo;

  fn new_values(input: NewMemo) -> Vec<Value> {
    vec![input.author_id.into(), input.content.into(), input.note.into()]
  }

  fn replace_values(input: MemoReplace) -> Vec<Value> {
    vec![input.author_id.into(), input.content.into(), input.note.into()]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![
      self.author_id.into(),
      self.content.clone().into(),
      self.note.clone().into(),
    ]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawMemo> {
    Ok(RawMemo {
      id:         row.get(0)?,
      author_id:  row.get(1)?,
      content:    row.get(2)?,
      note:       row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
      author:     RawEmployee::read(row, 6)?,
    })
  }

  fn decode(raw: RawMemo) -> Result<Self> {
    Ok(Memo {
      id:         raw.id,
      author_id:  raw.author_id,
      content:    raw.content,
      note:       raw.note,
      author:     raw.author.into_employee()?,
      created_at: decode_dt(&raw.created_at)?,
      updated_at: decode_dt(&raw.updated_at)?,
    })
  }
}

// ─── Report ──────────────────────────────────────────────────────────────────

pub struct RawReport {
  id:         i64,
  author_id:  i64,
  note:       String,
  created_at: String,
  updated_at: String,
  author:     RawEmployee,
}

impl Table for Report {
  const TABLE: &'static str = "reports";
  const COLUMNS: &'static [&'static str] = &["author_id", "note"];
  const SELECT: &'static str = "SELECT t.id, t.author_id, t.note, \
     t.created_at, t.updated_at, a.id, a.full_name, a.position, a.email, \
     a.phone, a.note, a.created_at, a.updated_at \
     FROM reports t JOIN employees a ON a.id = t.author_id";

  type Raw = RawReport;

  fn new_values(input: NewReport) -> Vec<Value> {
    vec![input.author_id.into(), input.note.into()]
  }

  fn replace_values(input: ReportReplace) -> Vec<Value> {
    vec![input.author_id.into(), input.note.into()]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![self.author_id.into(), self.note.clone().into()]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawReport> {
    Ok(RawReport {
      id:         row.get(0)?,
      author_id:  row.get(1)?,
      note:       row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
      author:     RawEmployee::read(row, 5)?,
    })
  }

  fn decode(raw: RawReport) -> Result<Self> {
    Ok(Report {
      id:         raw.id,
      author_id:  raw.author_id,
      note:       raw.note,
      author:     raw.author.into_employee()?,
      created_at: decode_dt(&raw.created_at)?,
      updated_at: decode_dt(&raw.updated_at)?,
    })
  }
}

// ─── Order ───────────────────────────────────────────────────────────────────

pub struct RawOrder {
  id:         i64,
  content:    String,
  signer_id:  i64,
  note:       Option<String>,
  created_at: String,
  updated_at: String,
  signer:     RawEmployee,
}

impl Table for Order {
  const TABLE: &'static str = "orders";
  const COLUMNS: &'static [&'static str] = &["content", "signer_id", "note"];
  const SELECT: &'static str = "SELECT t.id, t.content, t.signer_id, t.note, \
     t.created_at, t.updated_at, a.id, a.full_name, a.position, a.email, \
     a.phone, a.note, a.created_at, a.updated_at \
     FROM orders t JOIN employees a ON a.id = t.signer_id";

  type Raw = RawOrder;

  fn new_values(input: NewOrder) -> Vec<Value> {
    vec![input.content.into(), input.signer_id.into(), input.note.into()]
  }

  fn replace_values(input: OrderReplace) -> Vec<Value> {
    vec![input.content.into(), input.signer_id.into(), input.note.into()]
  }

  fn record_values(&self) -> Vec<Value> {
    vec![
      self.content.clone().into(),
      self.signer_id.into(),
      self.note.clone().into(),
    ]
  }

  fn read_row(row: &Row<'_>) -> rusqlite::Result<RawOrder> {
    Ok(RawOrder {
      id:         row.get(0)?,
      content:    row.get(1)?,
      signer_id:  row.get(2)?,
      note:       row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
      signer:     RawEmployee::read(row, 6)?,
    })
  }

  fn decode(raw: RawOrder) -> Result<Self> {
    Ok(Order {
      id:         raw.id,
      content:    raw.content,
      signer_id:  raw.signer_id,
      note:       raw.note,
      signer:     raw.signer.into_employee()?,
      created_at: decode_dt(&raw.created_at)?,
      updated_at: decode_dt(&raw.updated_at)?,
    })
  }
}

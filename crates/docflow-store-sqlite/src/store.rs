//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use docflow_core::{
  RecordId,
  store::{Page, RecordStore, Store},
};
use rusqlite::{Connection, OptionalExtension as _, params, params_from_iter, types::Value};

use crate::{Error, Result, encode::encode_dt, schema::SCHEMA, table::Table};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Docflow store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Overwrite the writable columns of row `id` with `values`, refresh
  /// `updated_at` and read the row back in the same transaction.
  async fn update_row<R: Table>(
    &self,
    id: RecordId,
    values: Vec<Value>,
  ) -> Result<Option<R>> {
    let now = encode_dt(Utc::now());

    let raw: Option<R::Raw> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          &update_sql::<R>(),
          params_from_iter(
            values
              .into_iter()
              .chain([Value::Text(now), Value::Integer(id)]),
          ),
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = select_one::<R>(&tx, id)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(R::decode).transpose()
  }
}

// ─── SQL builders ────────────────────────────────────────────────────────────

fn insert_sql<R: Table>() -> String {
  let columns = R::COLUMNS.join(", ");
  let placeholders = (1..=R::COLUMNS.len() + 2)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "INSERT INTO {} ({columns}, created_at, updated_at) VALUES ({placeholders})",
    R::TABLE
  )
}

fn update_sql<R: Table>() -> String {
  let n = R::COLUMNS.len();
  let assignments = R::COLUMNS
    .iter()
    .enumerate()
    .map(|(i, column)| format!("{column} = ?{}", i + 1))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "UPDATE {} SET {assignments}, updated_at = ?{} WHERE id = ?{}",
    R::TABLE,
    n + 1,
    n + 2
  )
}

fn select_one<R: Table>(conn: &Connection, id: RecordId) -> rusqlite::Result<R::Raw> {
  conn.query_row(
    &format!("{} WHERE t.id = ?1", R::SELECT),
    params![id],
    R::read_row,
  )
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl Store for SqliteStore {
  type Error = Error;
}

impl<R: Table> RecordStore<R> for SqliteStore {
  async fn create(&self, input: R::New) -> Result<R> {
    let values = R::new_values(input);
    let now = encode_dt(Utc::now());

    let raw: R::Raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          &insert_sql::<R>(),
          params_from_iter(
            values
              .into_iter()
              .chain([Value::Text(now.clone()), Value::Text(now)]),
          ),
        )?;
        let raw = select_one::<R>(&tx, tx.last_insert_rowid())?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    R::decode(raw)
  }

  async fn list(&self, page: Page) -> Result<Vec<R>> {
    let raws: Vec<R::Raw> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("{} ORDER BY t.id LIMIT ?1 OFFSET ?2", R::SELECT))?;
        let rows = stmt
          .query_map(params![page.limit, page.skip], R::read_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(R::decode).collect()
  }

  async fn get(&self, id: RecordId) -> Result<Option<R>> {
    let raw: Option<R::Raw> = self
      .conn
      .call(move |conn| Ok(select_one::<R>(conn, id).optional()?))
      .await?;

    raw.map(R::decode).transpose()
  }

  async fn replace(&self, id: RecordId, input: R::Replace) -> Result<Option<R>> {
    self.update_row::<R>(id, R::replace_values(input)).await
  }

  async fn save<'a>(&'a self, record: &'a R) -> Result<Option<R>> {
    self.update_row::<R>(record.id(), record.record_values()).await
  }

  async fn delete(&self, id: RecordId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          &format!("DELETE FROM {} WHERE id = ?1", R::TABLE),
          params![id],
        )?;
        Ok(changed > 0)
      })
      .await?;
    Ok(deleted)
  }
}

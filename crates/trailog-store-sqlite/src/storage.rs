//! [`SqliteStorage`] — the SQLite implementation of [`KeyValueStorage`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use trailog_core::persist::KeyValueStorage;

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// Blob storage backed by a single SQLite file.
pub struct SqliteStorage {
  conn: Connection,
}

impl SqliteStorage {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory database — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if found > SCHEMA_VERSION {
      return Err(Error::SchemaVersion {
        found,
        supported: SCHEMA_VERSION,
      });
    }
    conn.execute_batch(SCHEMA)?;
    tracing::debug!(from = found, to = SCHEMA_VERSION, "initialised schema");
    Ok(Self { conn })
  }

  /// All keys currently holding a blob, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
    let keys = stmt
      .query_map([], |r| r.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }
}

impl KeyValueStorage for SqliteStorage {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let blob = self
      .conn
      .query_row(
        "SELECT blob FROM kv WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    Ok(blob)
  }

  fn set(&mut self, key: &str, blob: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO kv (key, blob) VALUES (?1, ?2)
       ON CONFLICT (key) DO UPDATE SET
         blob = excluded.blob,
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
      rusqlite::params![key, blob],
    )?;
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<()> {
    self
      .conn
      .execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }
}

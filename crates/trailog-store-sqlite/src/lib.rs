//! SQLite backend for trailog's key-value storage.
//!
//! Each key maps to one text blob in a single table. The connection is used
//! synchronously; trailog runs one session per process.

mod schema;
mod storage;

pub mod error;

pub use error::{Error, Result};
pub use storage::SqliteStorage;

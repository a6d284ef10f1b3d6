//! Storage infrastructure
//!
//! The SQLite database is a single file. Connections are opened per
//! operation and closed straight after; there is no pool.

mod sqlite;

pub use sqlite::SqliteDatabase;

//! SQLite bootstrap for the key-value store.
//!
//! # Responsibility
//! - Open file or in-memory connections with `kv_entries` ready for use.
//!
//! # Invariants
//! - The schema stamp lives in `PRAGMA user_version`.
//! - A file stamped with any other version is refused, never rewritten.
//! - Failures surface as `StoreError`, the same type reads and writes use.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

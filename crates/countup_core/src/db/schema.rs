//! `kv_entries` table creation and schema stamp check.

use crate::repo::kv_repo::{StoreError, StoreResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Stamp written to `PRAGMA user_version` on databases this build creates.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_KV_ENTRIES: &str = include_str!("schema.sql");

/// Creates `kv_entries` on a blank database and checks the stamp otherwise.
///
/// # Errors
/// - `StoreError::UnsupportedSchema` when the file carries another stamp.
/// - `StoreError::Sqlite` when the file cannot be read or written.
pub fn ensure_schema(conn: &mut Connection) -> StoreResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let found = schema_version(&tx)?;

    match found {
        0 => {
            tx.execute_batch(CREATE_KV_ENTRIES)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            info!("event=db_schema module=db status=created version={SCHEMA_VERSION}");
        }
        // Stamped by us; recreate the table if someone dropped it.
        SCHEMA_VERSION => tx.execute_batch(CREATE_KV_ENTRIES)?,
        _ => {
            return Err(StoreError::UnsupportedSchema {
                found,
                supported: SCHEMA_VERSION,
            })
        }
    }

    tx.commit()?;
    Ok(())
}

/// Reads the `PRAGMA user_version` stamp; `0` for a blank database.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

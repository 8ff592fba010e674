//! Connection bootstrap for the SQLite key-value store.
//!
//! # Invariants
//! - Returned connections have a stamped `kv_entries` schema.
//! - SQLite failures while opening are reported as `StoreError::Open`.

use super::schema::ensure_schema;
use crate::repo::kv_repo::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY_TARGET: &str = ":memory:";

/// Opens the SQLite file at `path`, creating it when missing.
///
/// # Side effects
/// - Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), || Connection::open(path))
}

/// Opens a throwaway in-memory database, mainly for tests.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    open_with(IN_MEMORY_TARGET, Connection::open_in_memory)
}

fn open_with(
    target: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start target={target}");

    let result = connect()
        .map_err(StoreError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn))
        .map_err(|err| match err {
            StoreError::Sqlite(source) => StoreError::Open {
                target: target.to_string(),
                source,
            },
            other => other,
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={target} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={target} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)
}

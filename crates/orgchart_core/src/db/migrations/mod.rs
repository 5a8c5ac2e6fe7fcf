//! Schema registry for the organization store.
//!
//! # Responsibility
//! - Hold the fixed schema as ordered, versioned SQL scripts.
//! - Bring a fresh or older database up to the latest version atomically.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_org_schema.sql"),
}];

/// Latest schema version this binary can serve.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every migration newer than the connection's `user_version`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is newer than us.
/// - `DbError::Sqlite` when a script fails; nothing is applied in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_pending(conn, MIGRATIONS)
}

fn run_pending(conn: &mut Connection, registry: &[Migration]) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let to_version = registry.last().map_or(0, |migration| migration.version);

    if from_version > to_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: to_version,
        });
    }
    let pending: Vec<&Migration> = registry
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let started_at = Instant::now();
    // Scripts and version bumps share one transaction; a failing script
    // leaves `user_version` at `from_version`.
    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        debug!(
            "event=db_migrate_step module=db version={}",
            migration.version
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={to_version} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(())
}

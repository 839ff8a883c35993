use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;

const MIGRATION_READLIST_SQL: &str = include_str!("../migrations/0000_readlist.sql");
const MIGRATION_WORK_ID_INDEX_SQL: &str =
    include_str!("../migrations/0001_readlist_work_id_index.sql");

/// Opens the readlist database, creating it and applying any pending
/// migrations first.
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            id TEXT PRIMARY KEY NOT NULL,
            applied_at INTEGER NOT NULL
        );",
    )?;

    apply_migration(&conn, "0000_readlist", MIGRATION_READLIST_SQL)?;
    apply_migration(&conn, "0001_readlist_work_id_index", MIGRATION_WORK_ID_INDEX_SQL)?;
    Ok(conn)
}

fn apply_migration(conn: &Connection, id: &str, sql: &str) -> Result<()> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT id FROM schema_migrations WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(());
    }
    conn.execute_batch(sql)?;
    conn.execute(
        "INSERT INTO schema_migrations (id, applied_at) VALUES (?1, ?2)",
        params![id, chrono::Utc::now().timestamp_millis()],
    )?;
    Ok(())
}

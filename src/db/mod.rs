pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("failed to set database pragmas")?;

    conn.execute_batch(SCHEMA)
        .context("failed to create kv_store table")?;

    tracing::debug!(path, "database ready");
    Ok(conn)
}

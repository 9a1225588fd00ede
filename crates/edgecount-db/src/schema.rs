//! The `nodes` table, per SQL dialect.
//!
//! There is exactly one table and it never changes shape, so creating it with
//! `IF NOT EXISTS` on connect is all the schema management there is.

use edgecount_common::{Error, Result};
use rusqlite::Connection;

pub const SQLITE_NODES: &str = "CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    `from` TEXT NOT NULL,
    `to` TEXT NOT NULL
)";

pub const MYSQL_NODES: &str = "CREATE TABLE IF NOT EXISTS nodes (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    `from` VARCHAR(255) NOT NULL,
    `to` VARCHAR(255) NOT NULL
)";

pub const POSTGRES_NODES: &str = "CREATE TABLE IF NOT EXISTS nodes (
    id BIGSERIAL PRIMARY KEY,
    \"from\" VARCHAR NOT NULL,
    \"to\" VARCHAR NOT NULL
)";

/// Create the `nodes` table on a SQLite connection if it is missing.
pub fn ensure_sqlite(conn: &Connection) -> Result<()> {
    conn.execute_batch(SQLITE_NODES)
        .map_err(|e| Error::schema(e.to_string()))
}

//! SQLite connection management.
//!
//! A store session owns exactly one connection: opened here, with the `nodes`
//! table ensured, and released through [`close`].

use edgecount_common::{Error, Result};
use rusqlite::Connection;

use crate::schema;

/// Open (creating if needed) the SQLite database file at `db_path`.
///
/// # Example
///
/// ```no_run
/// use edgecount_db::connection::open;
///
/// let conn = open("/var/lib/edgecount/edges.sqlite").unwrap();
/// ```
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| Error::connection(format!("Failed to open {}: {}", db_path, e)))?;
    schema::ensure_sqlite(&conn)?;
    tracing::debug!(db = db_path, "SQLite connection ready");
    Ok(conn)
}

/// Open a private in-memory database.
///
/// The database exists only on this connection and is lost when it closes.
///
/// ```
/// use edgecount_db::connection::{close, open_memory};
///
/// let conn = open_memory().unwrap();
/// close(conn).unwrap();
/// ```
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::connection(format!("Failed to open in-memory database: {}", e)))?;
    schema::ensure_sqlite(&conn)?;
    Ok(conn)
}

/// Close a connection, reporting failures instead of swallowing them in drop.
pub fn close(conn: Connection) -> Result<()> {
    conn.close()
        .map_err(|(_, e)| Error::connection(format!("Failed to close connection: {}", e)))
}

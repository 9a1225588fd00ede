//! Edge database queries.
//!
//! Edges are only ever inserted one at a time and removed all at once.

use edgecount_common::{Error, Result};
use rusqlite::Connection;

use super::sqlite_err;
use crate::models::Edge;

/// Reject empty endpoint names before they reach any backend.
pub fn validate_endpoints(from: &str, to: &str) -> Result<()> {
    if from.is_empty() {
        return Err(Error::constraint("edge `from` must not be empty"));
    }
    if to.is_empty() {
        return Err(Error::constraint("edge `to` must not be empty"));
    }
    Ok(())
}

/// Insert one edge.
///
/// # Returns
///
/// * `Ok(Edge)` - The stored edge with its assigned id
/// * `Err(Error)` - If an endpoint is empty or a database error occurs
pub fn create_edge(conn: &Connection, from: &str, to: &str) -> Result<Edge> {
    validate_endpoints(from, to)?;

    conn.execute(
        "INSERT INTO nodes (`from`, `to`) VALUES (:from, :to)",
        rusqlite::named_params! {
            ":from": from,
            ":to": to,
        },
    )
    .map_err(sqlite_err)?;

    Ok(Edge {
        id: conn.last_insert_rowid(),
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Delete every edge.
///
/// Returns the number of rows removed; an empty table yields `Ok(0)`.
pub fn delete_all_edges(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM nodes", []).map_err(sqlite_err)
}

/// List all edges in insertion order.
pub fn list_edges(conn: &Connection) -> Result<Vec<Edge>> {
    let mut stmt = conn
        .prepare("SELECT id, `from`, `to` FROM nodes ORDER BY id")
        .map_err(sqlite_err)?;

    let edges = stmt
        .query_map([], |row| {
            Ok(Edge {
                id: row.get(0)?,
                from: row.get(1)?,
                to: row.get(2)?,
            })
        })
        .map_err(sqlite_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sqlite_err)?;

    Ok(edges)
}

/// Count all edges.
pub fn count_edges(conn: &Connection) -> Result<usize> {
    conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(sqlite_err)
}

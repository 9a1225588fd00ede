//! Node degree aggregation on SQLite.

use edgecount_common::Result;
use rusqlite::Connection;

use super::sqlite_err;
use crate::aggregate::{Dialect, QueryShape};
use crate::models::NodeDegree;

/// Run the degree view in the given shape.
///
/// SQLite compares TEXT with the BINARY collation, so `ORDER BY` already
/// yields byte-wise order. An empty table yields an empty vector.
pub fn node_degrees(conn: &Connection, shape: QueryShape) -> Result<Vec<NodeDegree>> {
    let mut stmt = conn
        .prepare(&shape.sql(Dialect::Sqlite))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(NodeDegree {
                name: row.get(0)?,
                in_count: row.get(1)?,
                out_count: row.get(2)?,
            })
        })
        .map_err(sqlite_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sqlite_err)?;

    Ok(rows)
}

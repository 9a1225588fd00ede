//! SQLite query modules.
//!
//! - edges: edge creation, listing, and bulk deletion
//! - degrees: the node degree aggregation

pub mod degrees;
pub mod edges;

use edgecount_common::Error;

/// Map a SQLite failure onto the common error.
///
/// A missing `nodes` table means the storage itself is unavailable, not that
/// the statement was wrong.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> Error {
    let msg = e.to_string();
    if msg.contains("no such table") {
        Error::connection(msg)
    } else {
        Error::query(msg)
    }
}

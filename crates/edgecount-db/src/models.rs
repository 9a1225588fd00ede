//! Rust models matching the database schema.

use serde::{Deserialize, Serialize};

/// A directed edge between two named nodes, stored as a row of `nodes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub id: i64,
    pub from: String,
    pub to: String,
}

/// One row of the node degree view.
///
/// `in_count` counts rows matched by the in-side join (`name = from`),
/// `out_count` rows matched by the out-side join (`name = to`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeDegree {
    pub name: String,
    #[serde(rename = "incount")]
    pub in_count: i64,
    #[serde(rename = "outcount")]
    pub out_count: i64,
}

impl NodeDegree {
    pub fn new(name: impl Into<String>, in_count: i64, out_count: i64) -> Self {
        Self {
            name: name.into(),
            in_count,
            out_count,
        }
    }
}

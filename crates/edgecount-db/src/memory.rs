//! In-process edge store.
//!
//! Keeps edges in a vector and answers the degree view with
//! [`aggregate::tally_shape`], no SQL involved.

use edgecount_common::Result;

use crate::aggregate::{self, QueryShape};
use crate::models::{Edge, NodeDegree};
use crate::queries::edges::validate_endpoints;
use crate::store::EdgeStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    edges: Vec<Edge>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EdgeStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn delete_all_edges(&mut self) -> Result<usize> {
        let removed = self.edges.len();
        self.edges.clear();
        Ok(removed)
    }

    fn insert_edge(&mut self, from: &str, to: &str) -> Result<Edge> {
        validate_endpoints(from, to)?;
        self.next_id += 1;
        let edge = Edge {
            id: self.next_id,
            from: from.to_string(),
            to: to.to_string(),
        };
        self.edges.push(edge.clone());
        Ok(edge)
    }

    fn list_edges(&mut self) -> Result<Vec<Edge>> {
        Ok(self.edges.clone())
    }

    fn node_degrees(&mut self, shape: QueryShape) -> Result<Vec<NodeDegree>> {
        Ok(aggregate::tally_shape(&self.edges, shape))
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

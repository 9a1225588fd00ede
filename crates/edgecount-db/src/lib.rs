//! Edgecount-DB: edge storage and the node degree aggregation.
//!
//! # Modules
//!
//! - `aggregate` - Degree query text, query shapes, and in-process tallies
//! - `connection` - Opening and closing a single SQLite connection
//! - `descriptor` - Parsing of connection descriptors
//! - `memory` - In-process store
//! - `models` - Edge and degree row types
//! - `mysql` - MySQL/MariaDB store (feature `mysql`)
//! - `postgres` - Postgres store (feature `postgres`)
//! - `queries` - SQLite query operations
//! - `schema` - `nodes` table definitions per backend
//! - `store` - The store trait and `connect`
//!
//! # Example
//!
//! ```
//! use edgecount_db::{connect, ConnectionDescriptor, QueryShape};
//!
//! let descriptor: ConnectionDescriptor = "sqlite::memory:".parse().unwrap();
//! let mut store = connect(&descriptor).unwrap();
//! store.insert_edge("Events", "Users").unwrap();
//! let rows = store.node_degrees(QueryShape::Grouped).unwrap();
//! assert_eq!(rows.len(), 2);
//! store.close().unwrap();
//! ```

pub mod aggregate;
pub mod connection;
pub mod descriptor;
pub mod memory;
pub mod models;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod queries;
pub mod schema;
pub mod store;

pub use aggregate::{Dialect, QueryShape};
pub use descriptor::ConnectionDescriptor;
pub use models::{Edge, NodeDegree};
pub use store::{connect, EdgeStore};

//! MySQL and MariaDB edge store.
//!
//! `mysql_async` is driven from a private current-thread runtime so the store
//! keeps the same blocking interface as the SQLite one. The connection is
//! disconnected on close, or on drop if close was never reached.

use edgecount_common::{Error, Result};
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts};
use tokio::runtime::Runtime;

use crate::aggregate::{self, Dialect, QueryShape};
use crate::models::{Edge, NodeDegree};
use crate::queries::edges::validate_endpoints;
use crate::schema;
use crate::store::EdgeStore;

/// ER_NO_SUCH_TABLE
const NO_SUCH_TABLE: u16 = 1146;

pub struct MysqlStore {
    runtime: Runtime,
    conn: Option<Conn>,
}

fn query_err(e: mysql_async::Error) -> Error {
    match e {
        mysql_async::Error::Server(ref server) if server.code == NO_SUCH_TABLE => {
            Error::connection(e.to_string())
        }
        _ => Error::query(e.to_string()),
    }
}

impl MysqlStore {
    /// Connect to `url` and create the `nodes` table if it is missing.
    pub fn connect(url: &str) -> Result<Self> {
        let opts = Opts::from_url(url).map_err(|e| Error::invalid_input(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let conn = runtime.block_on(async {
            let mut conn = Conn::new(opts)
                .await
                .map_err(|e| Error::connection(e.to_string()))?;
            conn.query_drop(schema::MYSQL_NODES)
                .await
                .map_err(|e| Error::schema(e.to_string()))?;
            Ok::<_, Error>(conn)
        })?;
        tracing::debug!("MySQL session ready");

        Ok(Self {
            runtime,
            conn: Some(conn),
        })
    }

    fn conn(&mut self) -> Result<(&Runtime, &mut Conn)> {
        match self.conn.as_mut() {
            Some(conn) => Ok((&self.runtime, conn)),
            None => Err(Error::connection("session already closed")),
        }
    }
}

impl EdgeStore for MysqlStore {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    fn delete_all_edges(&mut self) -> Result<usize> {
        let (rt, conn) = self.conn()?;
        rt.block_on(async {
            conn.query_drop("DELETE FROM nodes").await.map_err(query_err)?;
            Ok::<_, Error>(conn.affected_rows() as usize)
        })
    }

    fn insert_edge(&mut self, from: &str, to: &str) -> Result<Edge> {
        validate_endpoints(from, to)?;
        let (rt, conn) = self.conn()?;
        rt.block_on(async {
            conn.exec_drop("INSERT INTO nodes (`from`, `to`) VALUES (?, ?)", (from, to))
                .await
                .map_err(query_err)?;
            let id = conn
                .last_insert_id()
                .ok_or_else(|| Error::internal("insert returned no id"))?;
            Ok::<_, Error>(Edge {
                id: id as i64,
                from: from.to_string(),
                to: to.to_string(),
            })
        })
    }

    fn list_edges(&mut self) -> Result<Vec<Edge>> {
        let (rt, conn) = self.conn()?;
        rt.block_on(async {
            let rows: Vec<(i64, String, String)> = conn
                .query("SELECT id, `from`, `to` FROM nodes ORDER BY id")
                .await
                .map_err(query_err)?;
            Ok::<_, Error>(rows
                .into_iter()
                .map(|(id, from, to)| Edge { id, from, to })
                .collect())
        })
    }

    fn node_degrees(&mut self, shape: QueryShape) -> Result<Vec<NodeDegree>> {
        let (rt, conn) = self.conn()?;
        let rows: Vec<(String, i64, i64)> = rt
            .block_on(conn.query(shape.sql(Dialect::Mysql).into_owned()))
            .map_err(query_err)?;

        let mut rows: Vec<NodeDegree> = rows
            .into_iter()
            .map(|(name, in_count, out_count)| NodeDegree {
                name,
                in_count,
                out_count,
            })
            .collect();
        if !Dialect::Mysql.orders_bytewise() {
            aggregate::sort_by_name(&mut rows);
        }
        Ok(rows)
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        match self.conn.take() {
            Some(conn) => self
                .runtime
                .block_on(conn.disconnect())
                .map_err(|e| Error::connection(e.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for MysqlStore {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = self.runtime.block_on(conn.disconnect()) {
                tracing::warn!("MySQL disconnect failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Option<String> {
        std::env::var("EDGECOUNT_MYSQL_URL").ok()
    }

    #[test]
    #[ignore = "needs a MySQL server at EDGECOUNT_MYSQL_URL"]
    fn test_reproduction_scenario_on_mysql() {
        let Some(url) = url() else { return };
        let mut store = Box::new(MysqlStore::connect(&url).unwrap());

        store.delete_all_edges().unwrap();
        store.insert_edge("Events", "Users").unwrap();
        store.insert_edge("Events", "Orders").unwrap();
        store.insert_edge("Orders", "Users").unwrap();

        let rows = store.node_degrees(QueryShape::Grouped).unwrap();
        assert_eq!(
            rows,
            vec![
                NodeDegree::new("Events", 2, 0),
                NodeDegree::new("Orders", 1, 1),
                NodeDegree::new("Users", 0, 2),
            ]
        );
        assert_eq!(store.delete_all_edges().unwrap(), 3);
        store.close().unwrap();
    }

    #[test]
    fn test_bad_url_is_invalid_input() {
        let err = MysqlStore::connect("not a url").err().unwrap();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}

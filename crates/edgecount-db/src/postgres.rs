//! Postgres edge store.
//!
//! Same shape as the MySQL store: one `sqlx` connection driven from a private
//! current-thread runtime, closed on close or on drop.

use std::str::FromStr;

use edgecount_common::{Error, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tokio::runtime::Runtime;

use crate::aggregate::{self, Dialect, QueryShape};
use crate::models::{Edge, NodeDegree};
use crate::queries::edges::validate_endpoints;
use crate::schema;
use crate::store::EdgeStore;

/// SQLSTATE `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

pub struct PostgresStore {
    runtime: Runtime,
    conn: Option<PgConnection>,
}

fn query_err(e: sqlx::Error) -> Error {
    match e {
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNDEFINED_TABLE) => {
            Error::connection(e.to_string())
        }
        _ => Error::query(e.to_string()),
    }
}

impl PostgresStore {
    /// Connect to `url` and create the `nodes` table if it is missing.
    pub fn connect(url: &str) -> Result<Self> {
        let opts =
            PgConnectOptions::from_str(url).map_err(|e| Error::invalid_input(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let conn = runtime.block_on(async {
            let mut conn = PgConnection::connect_with(&opts)
                .await
                .map_err(|e| Error::connection(e.to_string()))?;
            sqlx::query(schema::POSTGRES_NODES)
                .execute(&mut conn)
                .await
                .map_err(|e| Error::schema(e.to_string()))?;
            Ok::<_, Error>(conn)
        })?;
        tracing::debug!("Postgres session ready");

        Ok(Self {
            runtime,
            conn: Some(conn),
        })
    }

    fn conn(&mut self) -> Result<(&Runtime, &mut PgConnection)> {
        match self.conn.as_mut() {
            Some(conn) => Ok((&self.runtime, conn)),
            None => Err(Error::connection("session already closed")),
        }
    }
}

impl EdgeStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn delete_all_edges(&mut self) -> Result<usize> {
        let (rt, conn) = self.conn()?;
        let done = rt
            .block_on(sqlx::query("DELETE FROM nodes").execute(&mut *conn))
            .map_err(query_err)?;
        Ok(done.rows_affected() as usize)
    }

    fn insert_edge(&mut self, from: &str, to: &str) -> Result<Edge> {
        validate_endpoints(from, to)?;
        let (rt, conn) = self.conn()?;
        let id: i64 = rt
            .block_on(
                sqlx::query_scalar(r#"INSERT INTO nodes ("from", "to") VALUES ($1, $2) RETURNING id"#)
                    .bind(from)
                    .bind(to)
                    .fetch_one(&mut *conn),
            )
            .map_err(query_err)?;
        Ok(Edge {
            id,
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    fn list_edges(&mut self) -> Result<Vec<Edge>> {
        let (rt, conn) = self.conn()?;
        let rows = rt
            .block_on(
                sqlx::query_as::<_, (i64, String, String)>(
                    r#"SELECT id, "from", "to" FROM nodes ORDER BY id"#,
                )
                .fetch_all(&mut *conn),
            )
            .map_err(query_err)?;
        Ok(rows
            .into_iter()
            .map(|(id, from, to)| Edge { id, from, to })
            .collect())
    }

    fn node_degrees(&mut self, shape: QueryShape) -> Result<Vec<NodeDegree>> {
        let sql = shape.sql(Dialect::Postgres);
        let (rt, conn) = self.conn()?;
        let rows = rt
            .block_on(sqlx::query_as::<_, (String, i64, i64)>(&sql).fetch_all(&mut *conn))
            .map_err(query_err)?;

        let mut rows: Vec<NodeDegree> = rows
            .into_iter()
            .map(|(name, in_count, out_count)| NodeDegree {
                name,
                in_count,
                out_count,
            })
            .collect();
        // Database collations follow the server locale.
        if !Dialect::Postgres.orders_bytewise() {
            aggregate::sort_by_name(&mut rows);
        }
        Ok(rows)
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        match self.conn.take() {
            Some(conn) => self
                .runtime
                .block_on(conn.close())
                .map_err(|e| Error::connection(e.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for PostgresStore {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = self.runtime.block_on(conn.close()) {
                tracing::warn!("Postgres close failed: {}", e);
            }
        }
    }
}

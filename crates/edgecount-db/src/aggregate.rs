//! The node degree aggregation.
//!
//! The view is defined in SQL over the `nodes` table: the union of the `from`
//! and `to` projections drives two left joins back to the table, one matching
//! `from` (the in-side) and one matching `to` (the out-side), grouped by name.
//!
//! Two join forms are kept. [`QueryShape::Grouped`] counts each side in its
//! own subquery before joining, so the two joins stay independent.
//! [`QueryShape::FanOut`] joins the raw table twice, which multiplies the
//! counts of any name with several rows on both sides.
//!
//! [`tally`] and [`tally_fan_out`] compute the same views in process.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use edgecount_common::Error;
use serde::{Deserialize, Serialize};

use crate::models::{Edge, NodeDegree};

/// Join form used to build the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryShape {
    /// Each side is counted before the join.
    #[default]
    Grouped,
    /// Both sides join the raw table.
    FanOut,
}

/// SQL dialect a query is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Mysql,
    Postgres,
}

impl Dialect {
    /// Whether `ORDER BY` on text already yields byte-wise order.
    ///
    /// SQLite compares with BINARY; MySQL and Postgres default collations are
    /// locale or case aware, so their rows are re-sorted with [`sort_by_name`].
    pub fn orders_bytewise(self) -> bool {
        matches!(self, Self::Sqlite)
    }
}

impl QueryShape {
    /// SQL text for this shape in the given dialect.
    ///
    /// The query text quotes `from`/`to` with backticks, which SQLite and
    /// MySQL accept; Postgres gets standard double quotes.
    pub fn sql(self, dialect: Dialect) -> Cow<'static, str> {
        let text = match self {
            Self::Grouped => GROUPED_SQL,
            Self::FanOut => FAN_OUT_SQL,
        };
        match dialect {
            Dialect::Sqlite | Dialect::Mysql => Cow::Borrowed(text),
            Dialect::Postgres => Cow::Owned(text.replace('`', "\"")),
        }
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grouped => f.write_str("grouped"),
            Self::FanOut => f.write_str("fan-out"),
        }
    }
}

impl FromStr for QueryShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grouped" => Ok(Self::Grouped),
            "fan-out" | "fanout" => Ok(Self::FanOut),
            other => Err(Error::invalid_input(format!("unknown query shape: {other}"))),
        }
    }
}

pub const GROUPED_SQL: &str = "\
SELECT q.name, COALESCE(MAX(i.cnt), 0) AS incount, COALESCE(MAX(o.cnt), 0) AS outcount
FROM (SELECT `from` AS name FROM nodes UNION SELECT `to` AS name FROM nodes) AS q
LEFT JOIN (SELECT `from` AS name, COUNT(*) AS cnt FROM nodes GROUP BY `from`) AS i
    ON q.name = i.name
LEFT JOIN (SELECT `to` AS name, COUNT(*) AS cnt FROM nodes GROUP BY `to`) AS o
    ON q.name = o.name
GROUP BY q.name
ORDER BY q.name ASC";

pub const FAN_OUT_SQL: &str = "\
SELECT DISTINCT q.name, COUNT(i.`from`) AS incount, COUNT(o.`to`) AS outcount
FROM (SELECT `from` AS name FROM nodes UNION SELECT `to` AS name FROM nodes) AS q
LEFT JOIN nodes AS i ON q.name = i.`from`
LEFT JOIN nodes AS o ON q.name = o.`to`
GROUP BY q.name
ORDER BY q.name ASC";

struct SideCounts<'a> {
    from: HashMap<&'a str, i64>,
    to: HashMap<&'a str, i64>,
    names: BTreeSet<&'a str>,
}

impl<'a> SideCounts<'a> {
    fn collect(edges: &'a [Edge]) -> Self {
        let mut from = HashMap::new();
        let mut to = HashMap::new();
        let mut names = BTreeSet::new();
        for edge in edges {
            *from.entry(edge.from.as_str()).or_insert(0) += 1;
            *to.entry(edge.to.as_str()).or_insert(0) += 1;
            names.insert(edge.from.as_str());
            names.insert(edge.to.as_str());
        }
        Self { from, to, names }
    }

    fn get(&self, name: &str) -> (i64, i64) {
        (
            self.from.get(name).copied().unwrap_or(0),
            self.to.get(name).copied().unwrap_or(0),
        )
    }
}

/// Degree view with independent sides, ordered by name.
pub fn tally(edges: &[Edge]) -> Vec<NodeDegree> {
    let counts = SideCounts::collect(edges);
    counts
        .names
        .iter()
        .map(|name| {
            let (in_count, out_count) = counts.get(name);
            NodeDegree::new(*name, in_count, out_count)
        })
        .collect()
}

/// Degree view as the raw double join produces it, ordered by name.
pub fn tally_fan_out(edges: &[Edge]) -> Vec<NodeDegree> {
    let counts = SideCounts::collect(edges);
    counts
        .names
        .iter()
        .map(|name| {
            let (from, to) = counts.get(name);
            // Each in-side row pairs with every out-side row, or with one NULL row.
            NodeDegree::new(*name, from * to.max(1), to * from.max(1))
        })
        .collect()
}

/// In-process view for the given shape.
pub fn tally_shape(edges: &[Edge], shape: QueryShape) -> Vec<NodeDegree> {
    match shape {
        QueryShape::Grouped => tally(edges),
        QueryShape::FanOut => tally_fan_out(edges),
    }
}

/// Byte-wise ascending order by name.
pub fn sort_by_name(rows: &mut [NodeDegree]) {
    rows.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
}

/// Sum of in-counts and sum of out-counts.
pub fn totals(rows: &[NodeDegree]) -> (i64, i64) {
    rows.iter()
        .fold((0, 0), |(i, o), row| (i + row.in_count, o + row.out_count))
}

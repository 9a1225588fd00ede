//! The reproduction scenario.
//!
//! Every target gets the same treatment: clear the edge table, seed the three
//! reproduction edges, run the degree query, and compare the rows with the
//! expected view and with the in-process tally of the stored edges.

use edgecount_common::{Error, Result};
use edgecount_db::aggregate::{tally_shape, totals};
use edgecount_db::{connect, ConnectionDescriptor, EdgeStore, NodeDegree, QueryShape};
use serde::Serialize;

use crate::config::Target;

/// Edges seeded before every run.
pub const SEED_EDGES: [(&str, &str); 3] = [
    ("Events", "Users"),
    ("Events", "Orders"),
    ("Orders", "Users"),
];

/// The degree view the seed must produce, ordered by name.
pub fn expected_degrees() -> Vec<NodeDegree> {
    vec![
        NodeDegree::new("Events", 2, 0),
        NodeDegree::new("Orders", 1, 1),
        NodeDegree::new("Users", 0, 2),
    ]
}

/// Result of running the scenario against one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub backend: String,
    pub shape: QueryShape,
    pub rows: Vec<NodeDegree>,
    /// Mismatches found; empty when the run passed.
    pub failures: Vec<String>,
    /// Set when the run could not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TargetReport {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.failures.is_empty()
    }
}

/// Reset, seed, and query one open store.
///
/// Returns the rows and the list of mismatches against the expected view.
pub fn run_scenario(
    store: &mut dyn EdgeStore,
    shape: QueryShape,
) -> Result<(Vec<NodeDegree>, Vec<String>)> {
    let removed = store.delete_all_edges()?;
    tracing::debug!(removed, "Reset edge table");

    for (from, to) in SEED_EDGES {
        store.insert_edge(from, to)?;
    }

    let rows = store.node_degrees(shape)?;
    let edges = store.list_edges()?;

    let mut failures = Vec::new();
    if edges.len() != SEED_EDGES.len() {
        failures.push(format!(
            "expected {} stored edges, found {}",
            SEED_EDGES.len(),
            edges.len()
        ));
    }
    failures.extend(compare(&expected_degrees(), &rows));

    let oracle = tally_shape(&edges, shape);
    if oracle != rows {
        failures.push(format!("rows differ from in-process tally {oracle:?}"));
    }

    if shape == QueryShape::Grouped {
        let (ins, outs) = totals(&rows);
        let total = edges.len() as i64;
        if ins != total || outs != total {
            failures.push(format!(
                "conservation broken: in {ins}, out {outs}, edges {total}"
            ));
        }
    }

    Ok((rows, failures))
}

/// Row-by-row differences between `expected` and `actual`.
pub fn compare(expected: &[NodeDegree], actual: &[NodeDegree]) -> Vec<String> {
    let mut failures = Vec::new();
    if expected.len() != actual.len() {
        failures.push(format!(
            "expected {} rows, got {}",
            expected.len(),
            actual.len()
        ));
    }
    for (i, (want, got)) in expected.iter().zip(actual).enumerate() {
        if want != got {
            failures.push(format!(
                "row {i}: expected {} {} {}, got {} {} {}",
                want.name, want.in_count, want.out_count, got.name, got.in_count, got.out_count
            ));
        }
    }
    failures
}

/// Connect to a target, run the scenario, and release the session.
pub fn run_target(target: &Target, shape: QueryShape) -> TargetReport {
    let mut report = TargetReport {
        target: target.name.clone(),
        backend: String::new(),
        shape,
        rows: Vec::new(),
        failures: Vec::new(),
        error: None,
    };

    let outcome = target
        .url
        .parse::<ConnectionDescriptor>()
        .and_then(|descriptor| {
            report.backend = descriptor.backend().to_string();
            let mut store = connect(&descriptor)?;
            let result = run_scenario(store.as_mut(), shape);
            let closed = store.close();
            let outcome = result?;
            closed?;
            Ok::<_, Error>(outcome)
        });

    match outcome {
        Ok((rows, failures)) => {
            report.rows = rows;
            report.failures = failures;
        }
        Err(e) => report.error = Some(e.to_string()),
    }

    if report.passed() {
        tracing::info!(target_name = %target.name, %shape, "Reproduction passed");
    } else {
        tracing::warn!(
            target_name = %target.name,
            %shape,
            error = report.error.as_deref().unwrap_or(""),
            failures = report.failures.len(),
            "Reproduction failed"
        );
    }

    report
}

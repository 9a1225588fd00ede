//! Reproduction scenario tests across the built-in backends.

use assert_matches::assert_matches;
use edgecount::config::Target;
use edgecount::scenario::{expected_degrees, run_scenario, run_target, SEED_EDGES};
use edgecount_common::Error;
use edgecount_db::aggregate::totals;
use edgecount_db::{connect, ConnectionDescriptor, EdgeStore, NodeDegree, QueryShape};

const LOCAL_BACKENDS: [&str; 2] = ["memory", "sqlite::memory:"];

fn open(descriptor: &str) -> Box<dyn EdgeStore> {
    let descriptor: ConnectionDescriptor = descriptor.parse().unwrap();
    connect(&descriptor).unwrap()
}

fn degrees_of(rows: &[NodeDegree], name: &str) -> (i64, i64) {
    rows.iter()
        .find(|r| r.name == name)
        .map(|r| (r.in_count, r.out_count))
        .unwrap_or((0, 0))
}

#[test]
fn test_scenario_passes_on_every_local_backend() {
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        let (rows, failures) = run_scenario(store.as_mut(), QueryShape::Grouped).unwrap();
        assert_eq!(rows, expected_degrees(), "{descriptor}");
        assert!(failures.is_empty(), "{descriptor}: {failures:?}");
        store.close().unwrap();
    }
}

#[test]
fn test_scenario_is_repeatable_on_one_session() {
    let mut store = open("sqlite::memory:");
    let (first, _) = run_scenario(store.as_mut(), QueryShape::Grouped).unwrap();
    let (second, _) = run_scenario(store.as_mut(), QueryShape::Grouped).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.list_edges().unwrap().len(), SEED_EDGES.len());
}

#[test]
fn test_empty_table_has_no_degrees() {
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        assert_eq!(store.delete_all_edges().unwrap(), 0);
        assert_eq!(store.delete_all_edges().unwrap(), 0);
        assert!(store.node_degrees(QueryShape::Grouped).unwrap().is_empty());
        assert!(store.list_edges().unwrap().is_empty());
    }
}

#[test]
fn test_adding_edge_changes_only_its_endpoints() {
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        for (from, to) in SEED_EDGES {
            store.insert_edge(from, to).unwrap();
        }
        let before = store.node_degrees(QueryShape::Grouped).unwrap();

        store.insert_edge("Users", "Payments").unwrap();
        let after = store.node_degrees(QueryShape::Grouped).unwrap();

        // In-side counts the `from` join, out-side the `to` join.
        let (users_in, users_out) = degrees_of(&before, "Users");
        assert_eq!(degrees_of(&after, "Users"), (users_in + 1, users_out));
        assert_eq!(degrees_of(&after, "Payments"), (0, 1));
        assert_eq!(degrees_of(&after, "Events"), degrees_of(&before, "Events"));
        assert_eq!(degrees_of(&after, "Orders"), degrees_of(&before, "Orders"));
    }
}

#[test]
fn test_conservation_with_duplicates_and_loops() {
    let edges = [
        ("a", "b"),
        ("a", "b"),
        ("b", "b"),
        ("c", "a"),
        ("b", "c"),
        ("b", "a"),
    ];
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        for (from, to) in edges {
            store.insert_edge(from, to).unwrap();
        }
        let rows = store.node_degrees(QueryShape::Grouped).unwrap();
        assert_eq!(totals(&rows), (edges.len() as i64, edges.len() as i64));
        assert_eq!(degrees_of(&rows, "b"), (3, 3));
    }
}

#[test]
fn test_fan_out_shape_diverges_on_two_sided_names() {
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        for (from, to) in [("hub", "x"), ("hub", "y"), ("p", "hub"), ("q", "hub")] {
            store.insert_edge(from, to).unwrap();
        }
        let grouped = store.node_degrees(QueryShape::Grouped).unwrap();
        let fan_out = store.node_degrees(QueryShape::FanOut).unwrap();
        assert_eq!(degrees_of(&grouped, "hub"), (2, 2), "{descriptor}");
        assert_eq!(degrees_of(&fan_out, "hub"), (4, 4), "{descriptor}");
    }
}

#[test]
fn test_empty_endpoint_is_constraint_violation() {
    for descriptor in LOCAL_BACKENDS {
        let mut store = open(descriptor);
        assert_matches!(store.insert_edge("", "Users"), Err(Error::ConstraintViolation(_)));
        assert!(store.list_edges().unwrap().is_empty());
    }
}

#[test]
fn test_run_target_reports_connection_failure() {
    let target = Target::new(
        "unreachable",
        "sqlite:///nonexistent-dir/edgecount/edges.db",
        true,
    );
    let report = run_target(&target, QueryShape::Grouped);
    assert!(!report.passed());
    assert!(report.error.unwrap().starts_with("Connection error"));
}

mod sql_matches_tally {
    use super::*;
    use edgecount_db::aggregate::{tally, tally_fan_out};
    use proptest::prelude::*;

    fn arb_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
        let name = prop::sample::select(vec!["Events", "Orders", "Users", "events", "Ü"]);
        prop::collection::vec((name.clone(), name), 0..25).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn sqlite_agrees_with_in_process_tally(pairs in arb_pairs()) {
            let mut store = open("sqlite::memory:");
            for (from, to) in &pairs {
                store.insert_edge(from, to).unwrap();
            }
            let edges = store.list_edges().unwrap();

            let grouped = store.node_degrees(QueryShape::Grouped).unwrap();
            prop_assert_eq!(&grouped, &tally(&edges));
            prop_assert_eq!(totals(&grouped), (pairs.len() as i64, pairs.len() as i64));

            let fan_out = store.node_degrees(QueryShape::FanOut).unwrap();
            prop_assert_eq!(fan_out, tally_fan_out(&edges));
        }
    }
}

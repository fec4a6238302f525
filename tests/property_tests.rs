#![allow(missing_docs)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use vizing::verify::{diff_edge_sets, verify_coloring};
use vizing::{ColoringOptions, EdgeRecord, Multigraph, PaletteGrowth};

/// Simple graphs: no loops, each unordered pair at most once.
fn arb_simple_graph() -> impl Strategy<Value = Vec<EdgeRecord>> {
    (2i64..=14).prop_flat_map(|n| {
        prop::collection::vec((1..=n, 1..=n), 0..60).prop_map(|pairs| {
            let mut seen = BTreeSet::new();
            let mut records = Vec::new();
            for (a, b) in pairs {
                if a == b || !seen.insert((a.min(b), a.max(b))) {
                    continue;
                }
                records.push(EdgeRecord::new(records.len() as i64 + 1, a, b, 1));
            }
            records
        })
    })
}

/// Loop-free multigraphs with up to three parallel copies per pair.
fn arb_multigraph() -> impl Strategy<Value = Vec<EdgeRecord>> {
    prop::collection::vec((1i64..=6, 1i64..=6, 1i64..=3), 0..30).prop_map(|edges| {
        edges
            .into_iter()
            .filter(|(a, b, _)| a != b)
            .enumerate()
            .map(|(i, (a, b, m))| EdgeRecord::new(i as i64 + 1, a, b, m))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_simple_graphs_color_within_bound(records in arb_simple_graph()) {
        let mut graph = Multigraph::from_records(records.clone()).unwrap();
        let report = graph.edge_coloring().unwrap();

        prop_assert!(report.within_bound());
        prop_assert_eq!(report.palette_growths, 0);
        prop_assert_eq!(report.direct_assignments + report.recolorings(), records.len());

        let verify = verify_coloring(&graph);
        prop_assert!(verify.success, "findings: {:?}", verify.findings);
        prop_assert!(diff_edge_sets(&records, &graph.colored_edges()).is_clean());
    }

    #[test]
    fn prop_coloring_is_deterministic(records in arb_simple_graph()) {
        let mut first = Multigraph::from_records(records.clone()).unwrap();
        let mut second = Multigraph::from_records(records).unwrap();
        let a = first.edge_coloring().unwrap();
        let b = second.edge_coloring().unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.colored_edges(), second.colored_edges());
    }

    #[test]
    fn prop_multigraphs_stay_proper_with_growth(records in arb_multigraph()) {
        let mut graph = Multigraph::from_records(records).unwrap();
        let options = ColoringOptions { palette_growth: PaletteGrowth::Allow };
        let report = graph.edge_coloring_with(&options, |_, _| {}).unwrap();

        let verify = verify_coloring(&graph);
        prop_assert_eq!(verify.counts.conflicts, 0);
        prop_assert_eq!(verify.counts.uncolored_edges, 0);
        if report.palette_growths == 0 {
            prop_assert!(verify.success, "findings: {:?}", verify.findings);
        }
    }

    #[test]
    fn prop_failed_runs_leave_consistent_state(records in arb_multigraph()) {
        let mut graph = Multigraph::from_records(records).unwrap();
        if graph.edge_coloring().is_err() {
            prop_assert!(graph.check_consistency(false).is_ok());
        }
    }
}

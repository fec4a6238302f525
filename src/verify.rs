//! Post-run checks over a coloring.
//!
//! [`verify_coloring`] inspects a colored [`Multigraph`], [`verify_triples`]
//! inspects output triples alone (for example a file produced by an earlier
//! run), and [`diff_edge_sets`] compares the edge ids of an input list with
//! those of an output list.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::graph::Multigraph;
use crate::types::{Color, ColoredEdge, EdgeId, EdgeRecord, VertexId};

const MAX_FINDINGS: usize = 32;

/// Severity of a verification finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifySeverity {
    /// Informational.
    Info,
    /// Suspicious but not a correctness violation.
    Warning,
    /// The coloring is wrong.
    Error,
}

/// One problem found by a check.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFinding {
    /// How bad it is.
    pub severity: VerifySeverity,
    /// Human-readable description.
    pub message: String,
}

/// Totals gathered while verifying.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VerifyCounts {
    /// Vertices seen.
    pub vertices: u64,
    /// Edges seen.
    pub edges: u64,
    /// Maximum degree Δ.
    pub max_degree: u64,
    /// Distinct colors in use.
    pub colors_used: u64,
    /// Edges still carrying color 0.
    pub uncolored_edges: u64,
    /// Vertex/color pairs used by more than one edge.
    pub conflicts: u64,
}

/// Outcome of a verification.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyReport {
    /// No error-level finding.
    pub success: bool,
    /// Findings, capped at a fixed number; the counts stay exact.
    pub findings: Vec<VerifyFinding>,
    /// Totals.
    pub counts: VerifyCounts,
}

impl VerifyReport {
    fn from_findings(findings: Vec<VerifyFinding>, counts: VerifyCounts) -> Self {
        let success = !findings
            .iter()
            .any(|f| f.severity == VerifySeverity::Error);
        Self {
            success,
            findings,
            counts,
        }
    }

    /// Puts the findings of `diff` ahead of the existing ones, keeping the
    /// findings cap, and fails the report unless the edge sets match.
    pub fn merge_diff(&mut self, diff: &EdgeSetDiff) {
        let mut merged = Vec::new();
        for finding in diff.findings().into_iter().chain(self.findings.drain(..)) {
            push(&mut merged, finding.severity, finding.message);
        }
        self.findings = merged;
        self.success = self.success && diff.is_clean();
    }
}

/// Checks properness, the Δ+1 bound, completeness and the per-vertex color
/// bookkeeping of a colored graph.
pub fn verify_coloring(graph: &Multigraph) -> VerifyReport {
    let mut report = verify_triples(&graph.colored_edges());
    if let Err(err) = graph.check_consistency(true) {
        push(
            &mut report.findings,
            VerifySeverity::Error,
            format!("bookkeeping check failed: {err}"),
        );
        report.success = false;
    }
    if !graph.palette().is_empty() && graph.palette().len() > graph.max_degree() + 1 {
        push(
            &mut report.findings,
            VerifySeverity::Warning,
            format!(
                "palette grew to {} colors for max degree {}",
                graph.palette().len(),
                graph.max_degree()
            ),
        );
    }
    report
}

/// Checks properness, the Δ+1 bound and completeness over output triples.
pub fn verify_triples(edges: &[ColoredEdge]) -> VerifyReport {
    let mut findings = Vec::new();
    let mut counts = VerifyCounts::default();
    let mut degree: HashMap<VertexId, u64> = HashMap::new();
    let mut at_vertex: HashMap<(VertexId, Color), Vec<EdgeId>> = HashMap::new();
    let mut used: BTreeSet<Color> = BTreeSet::new();

    for edge in edges {
        *degree.entry(edge.x).or_insert(0) += 1;
        *degree.entry(edge.y).or_insert(0) += 1;
        if !edge.color.is_assigned() {
            counts.uncolored_edges += 1;
            push(
                &mut findings,
                VerifySeverity::Error,
                format!("edge {} is uncolored", edge.ident),
            );
            continue;
        }
        used.insert(edge.color);
        for endpoint in [edge.x, edge.y] {
            at_vertex
                .entry((endpoint, edge.color))
                .or_default()
                .push(edge.ident);
        }
    }

    let mut clashes: Vec<(&(VertexId, Color), &Vec<EdgeId>)> =
        at_vertex.iter().filter(|(_, ids)| ids.len() > 1).collect();
    clashes.sort();
    for ((vertex, color), ids) in clashes {
        counts.conflicts += 1;
        push(
            &mut findings,
            VerifySeverity::Error,
            format!("vertex {vertex} has color {color} on edges {ids:?}"),
        );
    }

    counts.vertices = degree.len() as u64;
    counts.edges = edges.len() as u64;
    counts.max_degree = degree.values().copied().max().unwrap_or(0);
    counts.colors_used = used.len() as u64;
    if counts.colors_used > counts.max_degree + 1 {
        push(
            &mut findings,
            VerifySeverity::Error,
            format!(
                "{} colors used, above the bound of {} for max degree {}",
                counts.colors_used,
                counts.max_degree + 1,
                counts.max_degree
            ),
        );
    }
    VerifyReport::from_findings(findings, counts)
}

/// Differences between the edges of an input list and an output list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EdgeSetDiff {
    /// Input ids absent from the output.
    pub missing: Vec<EdgeId>,
    /// Output ids absent from the input.
    pub unexpected: Vec<EdgeId>,
    /// Output ids listed more than once.
    pub duplicated: Vec<EdgeId>,
    /// Ids present on both sides with different endpoint pairs.
    pub endpoint_mismatches: Vec<EdgeId>,
}

impl EdgeSetDiff {
    /// True when both sides hold exactly the same edges.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.unexpected.is_empty()
            && self.duplicated.is_empty()
            && self.endpoint_mismatches.is_empty()
    }

    /// Renders the diff as verification findings.
    pub fn findings(&self) -> Vec<VerifyFinding> {
        let mut findings = Vec::new();
        let groups: [(&str, &Vec<EdgeId>); 4] = [
            ("missing from the output", &self.missing),
            ("unexpected in the output", &self.unexpected),
            ("duplicated in the output", &self.duplicated),
            ("with changed endpoints", &self.endpoint_mismatches),
        ];
        for (label, ids) in groups {
            if !ids.is_empty() {
                push(
                    &mut findings,
                    VerifySeverity::Error,
                    format!("{} edge(s) {label}: {ids:?}", ids.len()),
                );
            }
        }
        findings
    }
}

/// Compares input records with output triples by edge id. Endpoint pairs are
/// compared without regard to order.
pub fn diff_edge_sets(input: &[EdgeRecord], output: &[ColoredEdge]) -> EdgeSetDiff {
    let expected: BTreeMap<EdgeId, (VertexId, VertexId)> = input
        .iter()
        .map(|r| (r.ident, unordered(r.x, r.y)))
        .collect();
    let mut seen: BTreeMap<EdgeId, (VertexId, VertexId)> = BTreeMap::new();
    let mut diff = EdgeSetDiff::default();

    for edge in output {
        let pair = unordered(edge.x, edge.y);
        if seen.insert(edge.ident, pair).is_some() {
            diff.duplicated.push(edge.ident);
            continue;
        }
        match expected.get(&edge.ident) {
            None => diff.unexpected.push(edge.ident),
            Some(want) if *want != pair => diff.endpoint_mismatches.push(edge.ident),
            Some(_) => {}
        }
    }
    diff.missing = expected
        .keys()
        .filter(|id| !seen.contains_key(id))
        .copied()
        .collect();
    diff.duplicated.sort();
    diff.duplicated.dedup();
    diff.unexpected.sort();
    diff.endpoint_mismatches.sort();
    diff
}

fn unordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn push(findings: &mut Vec<VerifyFinding>, severity: VerifySeverity, message: String) {
    if findings.len() < MAX_FINDINGS {
        findings.push(VerifyFinding { severity, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(id: i64, x: i64, y: i64, color: u32) -> ColoredEdge {
        ColoredEdge {
            ident: EdgeId(id),
            x: VertexId(x),
            y: VertexId(y),
            m: 1,
            color: Color(color),
        }
    }

    #[test]
    fn proper_triples_pass() {
        let report = verify_triples(&[triple(1, 1, 2, 1), triple(2, 2, 3, 2), triple(3, 1, 3, 3)]);
        assert!(report.success);
        assert_eq!(report.counts.max_degree, 2);
        assert_eq!(report.counts.colors_used, 3);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn shared_color_at_a_vertex_is_a_conflict() {
        let report = verify_triples(&[triple(1, 1, 2, 1), triple(2, 2, 3, 1)]);
        assert!(!report.success);
        assert_eq!(report.counts.conflicts, 1);
    }

    #[test]
    fn uncolored_and_over_bound_edges_fail() {
        let report = verify_triples(&[triple(1, 1, 2, 0)]);
        assert_eq!(report.counts.uncolored_edges, 1);
        assert!(!report.success);

        let report = verify_triples(&[triple(1, 1, 2, 1), triple(2, 3, 4, 5), triple(3, 5, 6, 9)]);
        assert_eq!(report.counts.conflicts, 0);
        assert!(!report.success);
    }

    #[test]
    fn merged_diff_leads_and_respects_the_cap() {
        let chain: Vec<ColoredEdge> = (1..=40).map(|k| triple(k, k, k + 1, 1)).collect();
        let mut report = verify_triples(&chain);
        assert_eq!(report.counts.conflicts, 39);
        assert_eq!(report.findings.len(), MAX_FINDINGS);

        let input = [EdgeRecord::new(99, 1, 2, 1)];
        let diff = diff_edge_sets(&input, &chain);
        report.merge_diff(&diff);
        assert_eq!(report.findings.len(), MAX_FINDINGS);
        assert!(report.findings[0].message.contains("missing from the output"));
        assert!(!report.success);
    }

    #[test]
    fn clean_diff_keeps_a_passing_report() {
        let colored = [triple(1, 1, 2, 1)];
        let mut report = verify_triples(&colored);
        report.merge_diff(&diff_edge_sets(&[EdgeRecord::new(1, 2, 1, 1)], &colored));
        assert!(report.success);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn diff_classifies_every_mismatch() {
        let input = [
            EdgeRecord::new(1, 1, 2, 1),
            EdgeRecord::new(2, 2, 3, 1),
            EdgeRecord::new(3, 3, 4, 1),
        ];
        let output = [
            triple(1, 2, 1, 1),
            triple(2, 2, 4, 2),
            triple(2, 2, 4, 2),
            triple(9, 5, 6, 1),
        ];
        let diff = diff_edge_sets(&input, &output);
        assert_eq!(diff.missing, vec![EdgeId(3)]);
        assert_eq!(diff.unexpected, vec![EdgeId(9)]);
        assert_eq!(diff.duplicated, vec![EdgeId(2)]);
        assert_eq!(diff.endpoint_mismatches, vec![EdgeId(2)]);
        assert_eq!(diff.findings().len(), 4);
        assert!(!diff.is_clean());
    }

    #[test]
    fn colored_graph_verifies_clean() {
        let mut graph = Multigraph::from_records([
            EdgeRecord::new(1, 1, 2, 1),
            EdgeRecord::new(2, 1, 3, 1),
            EdgeRecord::new(3, 1, 4, 1),
        ])
        .unwrap();
        graph.edge_coloring().unwrap();
        let report = verify_coloring(&graph);
        assert!(report.success, "{:?}", report.findings);
        assert_eq!(report.counts.edges, 3);
    }
}

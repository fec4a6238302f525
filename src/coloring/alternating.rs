use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::{ColoringError, Result};
use crate::graph::Multigraph;
use crate::types::{Color, EdgeIx, VertexIx};

/// A maximal path whose edge colors alternate between two colors.
#[derive(Debug)]
pub(crate) struct AlternatingPath {
    pub(crate) edges: SmallVec<[EdgeIx; 16]>,
    pub(crate) end: VertexIx,
}

impl AlternatingPath {
    pub(crate) fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Walks from `start` taking the edge colored `first`, then `second`, then
/// `first` again, and so on, until the current vertex has no edge of the
/// color required next.
///
/// Reads the live graph; callers plan swaps over the result.
pub(crate) fn alternating_path(
    graph: &Multigraph,
    start: VertexIx,
    first: Color,
    second: Color,
) -> Result<AlternatingPath> {
    let mut edges = SmallVec::new();
    let mut seen = FxHashSet::default();
    let mut at = start;
    let mut want = first;
    while let Some(edge) = graph.edge_with_color(at, want) {
        if !seen.insert(edge) {
            return Err(ColoringError::inconsistent(
                graph.vertex(at)?.id(),
                format!("{first}/{second} path revisits edge {}", graph.edge(edge)?.id()),
            ));
        }
        edges.push(edge);
        at = graph.edge(edge)?.other_endpoint(at)?;
        want = if want == first { second } else { first };
    }
    Ok(AlternatingPath { edges, end: at })
}

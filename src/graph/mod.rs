//! Arena-backed undirected multigraph.
//!
//! [`Multigraph`] is the sole owner of every [`Vertex`] and [`Edge`]. Vertices
//! refer to their incident edges and edges refer to their endpoints through
//! the copyable handles [`VertexIx`] and [`EdgeIx`], which index into the
//! graph's storage vectors.

mod edge;
mod palette;
mod vertex;


use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::error::{ColoringError, Result};
use crate::types::{Color, ColoredEdge, EdgeId, EdgeIx, EdgeRecord, VertexId, VertexIx};

pub use edge::Edge;
pub use palette::Palette;
pub use vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunState {
    Building,
    Colored,
    Failed,
}

/// An undirected multigraph together with its color palette.
///
/// Edges are processed by the coloring pass in insertion order. An instance
/// supports exactly one coloring run; afterwards it is read-only.
#[derive(Debug)]
pub struct Multigraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) palette: Palette,
    pub(crate) state: RunState,
    by_id: FxHashMap<VertexId, VertexIx>,
    edge_ids: FxHashSet<EdgeId>,
}

/// Size summary of a graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of distinct vertices.
    pub vertices: usize,
    /// Number of edge records.
    pub edges: usize,
    /// Maximum vertex degree (Δ).
    pub max_degree: usize,
    /// Edges whose endpoint pair already appeared on an earlier edge.
    pub parallel_edges: usize,
    /// Sum of all multiplicity tags.
    pub total_multiplicity: i64,
}

impl Default for Multigraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Multigraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            palette: Palette::default(),
            state: RunState::Building,
            by_id: FxHashMap::default(),
            edge_ids: FxHashSet::default(),
        }
    }

    /// Builds a graph from edge records, keeping their order.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = Self::new();
        for record in records {
            graph.add_edge(record.ident, record.x, record.y, record.m)?;
        }
        Ok(graph)
    }

    /// Returns the handle for `id`, creating the vertex if needed.
    pub fn add_vertex(&mut self, id: VertexId) -> Result<VertexIx> {
        self.ensure_building()?;
        if let Some(ix) = self.by_id.get(&id) {
            return Ok(*ix);
        }
        let ix = VertexIx(arena_index(self.vertices.len(), "vertex")?);
        self.vertices.push(Vertex::new(id));
        self.by_id.insert(id, ix);
        Ok(ix)
    }

    /// Appends an uncolored edge between `x` and `y`.
    ///
    /// Duplicate edge ids and self-loops are rejected. Repeating an endpoint
    /// pair under a new id adds a parallel edge.
    pub fn add_edge(&mut self, ident: EdgeId, x: VertexId, y: VertexId, m: i64) -> Result<EdgeIx> {
        self.ensure_building()?;
        if x == y {
            return Err(ColoringError::invalid(format!(
                "edge {ident} is a self-loop on vertex {x}"
            )));
        }
        if self.edge_ids.contains(&ident) {
            return Err(ColoringError::invalid(format!("duplicate edge id {ident}")));
        }
        let vx = self.add_vertex(x)?;
        let vy = self.add_vertex(y)?;
        let ix = EdgeIx(arena_index(self.edges.len(), "edge")?);
        self.edges.push(Edge::new(ident, vx, vy, m));
        self.edge_ids.insert(ident);
        self.vertices[vx.index()].on_edge_added(ix, Color::NONE);
        self.vertices[vy.index()].on_edge_added(ix, Color::NONE);
        Ok(ix)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Active palette. Empty until a coloring run sizes it.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Looks up a vertex handle by external id.
    pub fn vertex_ix(&self, id: VertexId) -> Option<VertexIx> {
        self.by_id.get(&id).copied()
    }

    /// Vertex record for a handle.
    pub fn vertex(&self, ix: VertexIx) -> Result<&Vertex> {
        self.vertices
            .get(ix.index())
            .ok_or_else(|| ColoringError::invalid(format!("unknown vertex handle {}", ix.index())))
    }

    /// Edge record for a handle.
    pub fn edge(&self, ix: EdgeIx) -> Result<&Edge> {
        self.edge_record(ix)
    }

    /// Vertices in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexIx, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexIx(i as u32), v))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIx(i as u32), e))
    }

    /// Δ, the maximum vertex degree; 0 for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).max().unwrap_or(0)
    }

    /// The incident edge of `v` colored `color`.
    ///
    /// A proper coloring has at most one. Should several qualify, the edge
    /// whose other endpoint has the lowest vertex id wins, then the earliest
    /// inserted one.
    pub fn edge_with_color(&self, v: VertexIx, color: Color) -> Option<EdgeIx> {
        if !color.is_assigned() {
            return None;
        }
        let vertex = self.vertices.get(v.index())?;
        if vertex.is_missing(color) {
            return None;
        }
        vertex
            .incident_edges()
            .filter(|e| self.edges[e.index()].color() == color)
            .min_by_key(|e| {
                let (x, y) = self.edges[e.index()].endpoints();
                let far = if x == v { y } else { x };
                (self.vertices[far.index()].id(), *e)
            })
    }

    /// Lowest palette color missing at both `x` and `y`.
    pub fn first_shared_missing(&self, x: VertexIx, y: VertexIx) -> Result<Option<Color>> {
        let vx = self.vertex(x)?;
        let vy = self.vertex(y)?;
        Ok(vx.missing_colors(&self.palette).find(|c| vy.is_missing(*c)))
    }

    /// Final `(ident, x, y, color)` triples in insertion order.
    pub fn colored_edges(&self) -> Vec<ColoredEdge> {
        self.edges
            .iter()
            .map(|edge| {
                let (x, y) = edge.endpoints();
                ColoredEdge {
                    ident: edge.id(),
                    x: self.vertices[x.index()].id(),
                    y: self.vertices[y.index()].id(),
                    m: edge.multiplicity(),
                    color: edge.color(),
                }
            })
            .collect()
    }

    /// Distinct colors currently in use, ascending.
    pub fn colors_used(&self) -> Vec<Color> {
        let mut used: Vec<Color> = self
            .edges
            .iter()
            .map(Edge::color)
            .filter(|c| c.is_assigned())
            .collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Size summary.
    pub fn stats(&self) -> GraphStats {
        let mut pairs: FxHashSet<(VertexIx, VertexIx)> = FxHashSet::default();
        let mut parallel_edges = 0;
        for edge in &self.edges {
            let (x, y) = edge.endpoints();
            if !pairs.insert((x.min(y), x.max(y))) {
                parallel_edges += 1;
            }
        }
        GraphStats {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
            max_degree: self.max_degree(),
            parallel_edges,
            total_multiplicity: self.edges.iter().map(Edge::multiplicity).sum(),
        }
    }

    /// Checks every vertex's color counts against its incident edges.
    ///
    /// With `complete` set, additionally requires every incident edge to be
    /// colored, i.e. the counts sum to the degree.
    pub fn check_consistency(&self, complete: bool) -> Result<()> {
        for vertex in &self.vertices {
            let mut expected = std::collections::BTreeMap::<Color, u32>::new();
            for e in vertex.incident_edges() {
                let color = self.edge_record(e)?.color();
                if color.is_assigned() {
                    *expected.entry(color).or_insert(0) += 1;
                }
            }
            let actual: std::collections::BTreeMap<Color, u32> = vertex.color_counts().collect();
            if actual.values().any(|count| *count == 0) {
                return Err(ColoringError::inconsistent(
                    vertex.id(),
                    "zero-count color entry was not pruned",
                ));
            }
            if actual != expected {
                return Err(ColoringError::inconsistent(
                    vertex.id(),
                    format!("counted colors {actual:?} but incident edges carry {expected:?}"),
                ));
            }
            if complete && vertex.counted_total() != vertex.degree() as u64 {
                return Err(ColoringError::inconsistent(
                    vertex.id(),
                    format!(
                        "color counts sum to {} but degree is {}",
                        vertex.counted_total(),
                        vertex.degree()
                    ),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn edge_record(&self, ix: EdgeIx) -> Result<&Edge> {
        self.edges
            .get(ix.index())
            .ok_or_else(|| ColoringError::invalid(format!("unknown edge handle {}", ix.index())))
    }

    pub(crate) fn vertex_id(&self, ix: VertexIx) -> VertexId {
        self.vertices[ix.index()].id()
    }

    fn ensure_building(&self) -> Result<()> {
        match self.state {
            RunState::Building => Ok(()),
            RunState::Colored | RunState::Failed => Err(ColoringError::GraphConsumed),
        }
    }
}

fn arena_index(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| ColoringError::invalid(format!("too many {what} records")))
}

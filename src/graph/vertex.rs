use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ColoringError, Result};
use crate::graph::Palette;
use crate::types::{Color, EdgeIx, VertexId};

/// A vertex record owned by the graph arena.
///
/// Incident edges are non-owning [`EdgeIx`] handles. The color counts map
/// holds, for every color present at this vertex, how many incident edges
/// carry it; an entry is removed the moment its count drops to zero. Both
/// collections change only through [`Vertex::on_edge_added`] and
/// [`Vertex::on_edge_removed`].
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    edges: BTreeSet<EdgeIx>,
    colors: BTreeMap<Color, u32>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId) -> Self {
        Self {
            id,
            edges: BTreeSet::new(),
            colors: BTreeMap::new(),
        }
    }

    /// External identifier.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Number of incident edges. Multiplicity tags do not count.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Incident edge handles in insertion order.
    pub fn incident_edges(&self) -> impl Iterator<Item = EdgeIx> + '_ {
        self.edges.iter().copied()
    }

    /// How many incident edges currently carry `color`.
    pub fn color_count(&self, color: Color) -> u32 {
        self.colors.get(&color).copied().unwrap_or(0)
    }

    /// Colors present at this vertex, ascending, with their counts.
    pub fn color_counts(&self) -> impl Iterator<Item = (Color, u32)> + '_ {
        self.colors.iter().map(|(color, count)| (*color, *count))
    }

    /// True when no incident edge carries `color`.
    pub fn is_missing(&self, color: Color) -> bool {
        !self.colors.contains_key(&color)
    }

    /// Palette colors not used at this vertex, ascending.
    ///
    /// Computed from the live counts on every call.
    pub fn missing_colors<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = Color> + 'a {
        palette.iter().filter(move |color| self.is_missing(*color))
    }

    /// Lowest palette color not used at this vertex.
    pub fn first_missing(&self, palette: &Palette) -> Option<Color> {
        self.missing_colors(palette).next()
    }

    /// Attaches `edge`, counting `color` when it is a real color.
    pub(crate) fn on_edge_added(&mut self, edge: EdgeIx, color: Color) {
        self.edges.insert(edge);
        if color.is_assigned() {
            *self.colors.entry(color).or_insert(0) += 1;
        }
    }

    /// Detaches `edge` and releases its `color`, pruning the count entry at zero.
    pub(crate) fn on_edge_removed(&mut self, edge: EdgeIx, color: Color) -> Result<()> {
        self.check_release(edge, color)?;
        self.edges.remove(&edge);
        if !color.is_assigned() {
            return Ok(());
        }
        match self.colors.get_mut(&color) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                self.colors.remove(&color);
            }
        }
        Ok(())
    }

    /// Fails exactly when [`Vertex::on_edge_removed`] would, without mutating.
    pub(crate) fn check_release(&self, edge: EdgeIx, color: Color) -> Result<()> {
        if !self.edges.contains(&edge) {
            return Err(ColoringError::inconsistent(
                self.id,
                format!("edge #{} is not incident", edge.position()),
            ));
        }
        if color.is_assigned() && !self.colors.contains_key(&color) {
            return Err(ColoringError::inconsistent(
                self.id,
                format!("color {color} released but never counted"),
            ));
        }
        Ok(())
    }

    pub(crate) fn counted_total(&self) -> u64 {
        self.colors.values().map(|count| u64::from(*count)).sum()
    }
}

use tracing::trace;

use super::Multigraph;
use crate::error::{ColoringError, Result};
use crate::types::{Color, EdgeId, EdgeIx, VertexIx};

/// An edge record owned by the graph arena.
#[derive(Clone, Debug)]
pub struct Edge {
    id: EdgeId,
    x: VertexIx,
    y: VertexIx,
    multiplicity: i64,
    color: Color,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, x: VertexIx, y: VertexIx, multiplicity: i64) -> Self {
        Self {
            id,
            x,
            y,
            multiplicity,
            color: Color::NONE,
        }
    }

    /// External identifier.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Both endpoints, in input order.
    pub fn endpoints(&self) -> (VertexIx, VertexIx) {
        (self.x, self.y)
    }

    /// Multiplicity annotation from the input record.
    pub fn multiplicity(&self) -> i64 {
        self.multiplicity
    }

    /// Current color, [`Color::NONE`] while uncolored.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The endpoint opposite to `v`.
    pub fn other_endpoint(&self, v: VertexIx) -> Result<VertexIx> {
        if v == self.x {
            Ok(self.y)
        } else if v == self.y {
            Ok(self.x)
        } else {
            Err(ColoringError::invalid(format!(
                "vertex handle {} is not an endpoint of edge {}",
                v.index(),
                self.id
            )))
        }
    }
}

impl Multigraph {
    /// Moves `edge` from its current color to `color`.
    ///
    /// Both endpoints release the old color and count the new one. Recoloring
    /// to the current color returns immediately without touching either
    /// endpoint. `color` must be [`Color::NONE`] or a palette color. Both
    /// endpoints are checked before either is touched, so an error leaves the
    /// graph unchanged.
    pub fn recolor(&mut self, edge: EdgeIx, color: Color) -> Result<()> {
        let record = self.edge_record(edge)?;
        let old = record.color;
        if old == color {
            return Ok(());
        }
        if color.is_assigned() && !self.palette.contains(color) {
            return Err(ColoringError::invalid(format!(
                "color {color} for edge {} is outside the palette of {} colors",
                record.id,
                self.palette.len()
            )));
        }
        let (x, y) = record.endpoints();
        for endpoint in [x, y] {
            self.vertices[endpoint.index()].check_release(edge, old)?;
        }
        for endpoint in [x, y] {
            let vertex = &mut self.vertices[endpoint.index()];
            vertex.on_edge_removed(edge, old)?;
            vertex.on_edge_added(edge, color);
        }
        self.edges[edge.index()].color = color;
        trace!(edge = %self.edges[edge.index()].id, from = %old, to = %color, "recolor");
        Ok(())
    }
}

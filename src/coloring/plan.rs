use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::error::{ColoringError, Result};
use crate::graph::Multigraph;
use crate::types::{Color, EdgeIx, VertexIx};

/// Pending recolorings layered over the live graph.
///
/// Reads go through the overlay, so a plan can be built step by step on top
/// of its own earlier decisions. Nothing touches the graph until
/// [`RecolorPlan::apply`], and `apply` refuses plans that fail validation.
#[derive(Debug)]
pub(crate) struct RecolorPlan {
    target: EdgeIx,
    changes: BTreeMap<EdgeIx, Color>,
}

impl RecolorPlan {
    pub(crate) fn new(target: EdgeIx) -> Self {
        Self {
            target,
            changes: BTreeMap::new(),
        }
    }

    pub(crate) fn set(&mut self, edge: EdgeIx, color: Color) {
        self.changes.insert(edge, color);
    }

    pub(crate) fn color_of(&self, graph: &Multigraph, edge: EdgeIx) -> Result<Color> {
        match self.changes.get(&edge) {
            Some(color) => Ok(*color),
            None => Ok(graph.edge(edge)?.color()),
        }
    }

    /// Whether no incident edge of `v` carries `color` once the plan applies.
    pub(crate) fn is_free(&self, graph: &Multigraph, v: VertexIx, color: Color) -> Result<bool> {
        for edge in graph.vertex(v)?.incident_edges() {
            if self.color_of(graph, edge)? == color {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Lowest palette color free at both `x` and `y` under the plan.
    pub(crate) fn first_shared_free(
        &self,
        graph: &Multigraph,
        x: VertexIx,
        y: VertexIx,
    ) -> Result<Option<Color>> {
        for color in graph.palette().iter() {
            if self.is_free(graph, x, color)? && self.is_free(graph, y, color)? {
                return Ok(Some(color));
            }
        }
        Ok(None)
    }

    /// Swaps `a` and `b` on every edge of `path`.
    pub(crate) fn swap_along(
        &mut self,
        graph: &Multigraph,
        path: &[EdgeIx],
        a: Color,
        b: Color,
    ) -> Result<()> {
        for edge in path {
            let current = self.color_of(graph, *edge)?;
            let swapped = if current == a {
                b
            } else if current == b {
                a
            } else {
                let vertex = graph.edge(*edge)?.endpoints().0;
                return Err(ColoringError::inconsistent(
                    graph.vertex(vertex)?.id(),
                    format!("edge {} on a {a}/{b} path carries {current}", graph.edge(*edge)?.id()),
                ));
            };
            self.set(*edge, swapped);
        }
        Ok(())
    }

    /// Checks that the plan colors its target with a palette color and
    /// leaves every vertex it touches without a repeated color.
    pub(crate) fn validate(&self, graph: &Multigraph) -> Result<()> {
        let target = graph.edge(self.target)?;
        let target_color = self.color_of(graph, self.target)?;
        if !graph.palette().contains(target_color) {
            return Err(ColoringError::recoloring(
                target.id(),
                format!("plan assigns {target_color}, which is not a palette color"),
            ));
        }
        let mut touched: SmallVec<[VertexIx; 16]> = SmallVec::new();
        for edge in self.changes.keys() {
            let (x, y) = graph.edge(*edge)?.endpoints();
            touched.push(x);
            touched.push(y);
        }
        touched.sort_unstable();
        touched.dedup();
        for v in touched {
            let mut seen: SmallVec<[Color; 16]> = SmallVec::new();
            for edge in graph.vertex(v)?.incident_edges() {
                let color = self.color_of(graph, edge)?;
                if !color.is_assigned() {
                    continue;
                }
                if seen.contains(&color) {
                    return Err(ColoringError::recoloring(
                        target.id(),
                        format!(
                            "plan would repeat color {color} at vertex {}",
                            graph.vertex(v)?.id()
                        ),
                    ));
                }
                seen.push(color);
            }
        }
        Ok(())
    }

    /// Validates, then performs every pending recolor.
    pub(crate) fn apply(self, graph: &mut Multigraph) -> Result<usize> {
        self.validate(graph)?;
        let applied = self.changes.len();
        for (edge, color) in self.changes {
            graph.recolor(edge, color)?;
        }
        Ok(applied)
    }
}

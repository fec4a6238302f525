use smallvec::SmallVec;
use tracing::debug;

use super::alternating::alternating_path;
use super::plan::RecolorPlan;
use crate::error::{ColoringError, Result};
use crate::graph::Multigraph;
use crate::types::{Color, EdgeIx, VertexIx};

/// A Vizing fan around `center`.
///
/// `leaves[0]` is the uncolored edge being resolved. For every `i >= 1`, the
/// color of `leaves[i]` is missing at the vertex of `leaves[i - 1]`, and all
/// leaf vertices are distinct.
#[derive(Debug)]
pub(crate) struct Fan {
    center: VertexIx,
    leaves: SmallVec<[(VertexIx, EdgeIx); 8]>,
}

impl Fan {
    /// Grows a maximal fan, always extending with the lowest eligible color.
    pub(crate) fn build(graph: &Multigraph, center: VertexIx, target: EdgeIx) -> Result<Self> {
        let first = graph.edge(target)?.other_endpoint(center)?;
        let mut leaves: SmallVec<[(VertexIx, EdgeIx); 8]> = SmallVec::new();
        leaves.push((first, target));
        loop {
            let (last, _) = leaves[leaves.len() - 1];
            let tip = graph.vertex(last)?;
            let mut next = None;
            for color in tip.missing_colors(graph.palette()) {
                let Some(edge) = graph.edge_with_color(center, color) else {
                    continue;
                };
                let leaf = graph.edge(edge)?.other_endpoint(center)?;
                if leaves.iter().all(|(v, _)| *v != leaf) {
                    next = Some((leaf, edge));
                    break;
                }
            }
            match next {
                Some(entry) => leaves.push(entry),
                None => break,
            }
        }
        Ok(Self { center, leaves })
    }

    pub(crate) fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Misra–Gries step: invert the `d/c` path at the center, pick the first
    /// leaf `w` that still ends a fan and misses `d`, rotate up to `w` and
    /// give `(center, w)` color `d`.
    pub(crate) fn plan_rotation(&self, graph: &Multigraph) -> Result<RecolorPlan> {
        let target = self.leaves[0].1;
        let target_id = graph.edge(target)?.id();
        let c = graph
            .vertex(self.center)?
            .first_missing(graph.palette())
            .ok_or_else(|| ColoringError::recoloring(target_id, "fan center has no missing color"))?;
        let (tip, _) = self.leaves[self.leaves.len() - 1];
        let d = graph
            .vertex(tip)?
            .first_missing(graph.palette())
            .ok_or_else(|| ColoringError::recoloring(target_id, "fan tip has no missing color"))?;

        let mut plan = RecolorPlan::new(target);
        if c != d {
            let path = alternating_path(graph, self.center, d, c)?;
            plan.swap_along(graph, &path.edges, c, d)?;
            debug!(
                edge = %target_id,
                c = %c,
                d = %d,
                inverted = path.edges.len(),
                "inverted path at fan center"
            );
        }

        let w = self.pivot(graph, &plan, d)?.ok_or_else(|| {
            ColoringError::recoloring(target_id, "no fan prefix ends at a vertex missing d")
        })?;
        for j in 0..w {
            let shifted = plan.color_of(graph, self.leaves[j + 1].1)?;
            plan.set(self.leaves[j].1, shifted);
        }
        plan.set(self.leaves[w].1, d);
        Ok(plan)
    }

    fn pivot(&self, graph: &Multigraph, plan: &RecolorPlan, d: Color) -> Result<Option<usize>> {
        for (i, (leaf, edge)) in self.leaves.iter().enumerate() {
            if i > 0 {
                let color = plan.color_of(graph, *edge)?;
                let prev = self.leaves[i - 1].0;
                if !color.is_assigned() || !plan.is_free(graph, prev, color)? {
                    return Ok(None);
                }
            }
            if plan.is_free(graph, *leaf, d)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }
}

//! The greedy Δ+1 coloring pass and its recoloring fallback.
//!
//! Edges are colored in insertion order with the lowest color missing at both
//! endpoints. When no such color exists, the blocked edge is resolved inside
//! the existing palette: first by swapping the two colors along an
//! alternating path that starts at the second endpoint, and, when that path
//! loops back to the first endpoint, by a Misra–Gries fan rotation. Every
//! resolution is planned and validated before it touches the graph.

mod alternating;
mod fan;
mod plan;


use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::error::{ColoringError, Result};
use crate::graph::{Multigraph, Palette, RunState};
use crate::types::{Color, EdgeIx, VertexIx};

use alternating::alternating_path;
use fan::Fan;
use plan::RecolorPlan;

/// What to do when recoloring cannot free a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteGrowth {
    /// Surface [`ColoringError::RecoloringFailure`].
    #[default]
    Forbid,
    /// Append a fresh color and log a warning. Breaks the Δ+1 bound.
    Allow,
}

/// Options for [`Multigraph::edge_coloring_with`].
#[derive(Clone, Debug, Default)]
pub struct ColoringOptions {
    /// Fallback taken after a recoloring failure.
    pub palette_growth: PaletteGrowth,
}

/// How a blocked edge ended up colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Both endpoints turned out to miss the same color.
    SharedMissing,
    /// Two colors were swapped along an alternating path.
    AlternatingPath,
    /// A fan was rotated.
    FanRotation,
}

/// Summary of one coloring run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColoringReport {
    /// Maximum vertex degree Δ.
    pub max_degree: usize,
    /// Palette size at the end of the run.
    pub palette_size: usize,
    /// Distinct colors assigned.
    pub colors_used: usize,
    /// Edges colored straight from the shared missing set.
    pub direct_assignments: usize,
    /// Blocked edges resolved without moving other edges.
    pub shared_missing: usize,
    /// Blocked edges resolved by an alternating-path swap.
    pub path_swaps: usize,
    /// Blocked edges resolved by a fan rotation.
    pub fan_rotations: usize,
    /// Colors appended by the fallback.
    pub palette_growths: usize,
}

impl ColoringReport {
    /// Number of edges that needed the recoloring procedure.
    pub fn recolorings(&self) -> usize {
        self.shared_missing + self.path_swaps + self.fan_rotations + self.palette_growths
    }

    /// True when the run stayed inside `{1 ..= Δ+1}`.
    pub fn within_bound(&self) -> bool {
        self.colors_used <= self.max_degree + 1
    }

    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::SharedMissing => self.shared_missing += 1,
            Resolution::AlternatingPath => self.path_swaps += 1,
            Resolution::FanRotation => self.fan_rotations += 1,
        }
    }
}

impl Multigraph {
    /// Colors every edge with at most Δ+1 colors using default options.
    pub fn edge_coloring(&mut self) -> Result<ColoringReport> {
        self.edge_coloring_with(&ColoringOptions::default(), |_, _| {})
    }

    /// Colors every edge, calling `on_progress(done, total)` after each one.
    ///
    /// The instance is consumed by the run whatever its outcome; a failed run
    /// leaves the graph consistent but partially colored.
    pub fn edge_coloring_with<F>(
        &mut self,
        options: &ColoringOptions,
        on_progress: F,
    ) -> Result<ColoringReport>
    where
        F: FnMut(usize, usize),
    {
        if self.state != RunState::Building {
            return Err(ColoringError::GraphConsumed);
        }
        self.state = RunState::Failed;
        let report = self.run_pass(options, on_progress)?;
        self.state = RunState::Colored;
        Ok(report)
    }

    fn run_pass<F>(&mut self, options: &ColoringOptions, mut on_progress: F) -> Result<ColoringReport>
    where
        F: FnMut(usize, usize),
    {
        let delta = self.max_degree();
        self.palette = Palette::for_max_degree(delta);
        let total = self.edges.len();
        let mut report = ColoringReport {
            max_degree: delta,
            ..ColoringReport::default()
        };
        info!(
            vertices = self.vertices.len(),
            edges = total,
            max_degree = delta,
            palette = self.palette.len(),
            "edge coloring started"
        );

        for position in 0..total {
            let edge = EdgeIx(position as u32);
            let (x, y) = self.edge(edge)?.endpoints();
            if let Some(color) = self.first_shared_missing(x, y)? {
                self.recolor(edge, color)?;
                report.direct_assignments += 1;
                trace!(edge = %self.edge(edge)?.id(), color = %color, "direct assignment");
            } else {
                match self.recolor_blocked(edge) {
                    Ok(resolution) => report.record(resolution),
                    Err(err @ ColoringError::RecoloringFailure { .. })
                        if options.palette_growth == PaletteGrowth::Allow =>
                    {
                        let color = self.palette.grow();
                        warn!(
                            error = %err,
                            color = %color,
                            palette = self.palette.len(),
                            "recoloring failed; growing palette beyond the Δ+1 bound"
                        );
                        self.recolor(edge, color)?;
                        report.palette_growths += 1;
                    }
                    Err(err) => {
                        error!(error = %err, "edge coloring aborted");
                        return Err(err);
                    }
                }
            }
            on_progress(position + 1, total);
        }

        self.check_consistency(true)?;
        report.palette_size = self.palette.len();
        report.colors_used = self.colors_used().len();
        info!(
            colors_used = report.colors_used,
            recolorings = report.recolorings(),
            palette_growths = report.palette_growths,
            "edge coloring finished"
        );
        Ok(report)
    }

    /// Colors `edge`, whose endpoints share no missing color, without
    /// growing the palette.
    pub(crate) fn recolor_blocked(&mut self, edge: EdgeIx) -> Result<Resolution> {
        let record = self.edge(edge)?;
        let edge_id = record.id();
        let (u, v) = record.endpoints();
        let c = self.lowest_missing(u, edge)?;
        let d = self.lowest_missing(v, edge)?;

        if c == d {
            let mut plan = RecolorPlan::new(edge);
            plan.set(edge, c);
            plan.apply(self)?;
            debug!(edge = %edge_id, color = %c, "blocked edge had a shared missing color");
            return Ok(Resolution::SharedMissing);
        }

        let path = alternating_path(self, v, c, d)?;
        if path.end != u {
            let mut plan = RecolorPlan::new(edge);
            plan.swap_along(self, &path.edges, c, d)?;
            let color = plan.first_shared_free(self, u, v)?.ok_or_else(|| {
                ColoringError::recoloring(edge_id, "path swap freed no shared color")
            })?;
            plan.set(edge, color);
            let swapped = path.edges.len();
            plan.apply(self)?;
            debug!(
                edge = %edge_id,
                c = %c,
                d = %d,
                swapped,
                color = %color,
                "resolved by alternating path swap"
            );
            return Ok(Resolution::AlternatingPath);
        }
        debug!(
            edge = %edge_id,
            c = %c,
            d = %d,
            path = path.edges.len(),
            empty = path.is_empty(),
            "alternating path closes on the other endpoint; rotating a fan"
        );

        let mut last_err = None;
        for center in [u, v] {
            match self.try_fan(center, edge) {
                Ok(()) => return Ok(Resolution::FanRotation),
                Err(err @ ColoringError::RecoloringFailure { .. }) => {
                    debug!(edge = %edge_id, center = %self.vertex_id(center), error = %err, "fan rejected");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| ColoringError::recoloring(edge_id, "no fan attempted")))
    }

    fn try_fan(&mut self, center: VertexIx, edge: EdgeIx) -> Result<()> {
        let fan = Fan::build(self, center, edge)?;
        let plan = fan.plan_rotation(self)?;
        let moved = plan.apply(self)?;
        debug!(
            edge = %self.edge(edge)?.id(),
            center = %self.vertex_id(center),
            fan = fan.len(),
            moved,
            "resolved by fan rotation"
        );
        Ok(())
    }

    fn lowest_missing(&self, v: VertexIx, edge: EdgeIx) -> Result<Color> {
        self.vertex(v)?.first_missing(&self.palette).ok_or_else(|| {
            let id = self.edges[edge.index()].id();
            ColoringError::recoloring(
                id,
                format!(
                    "vertex {} has no missing color in a palette of {}",
                    self.vertex_id(v),
                    self.palette.len()
                ),
            )
        })
    }
}

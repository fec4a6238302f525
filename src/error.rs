use thiserror::Error;

use crate::types::{EdgeId, VertexId};

/// Result alias used across the coloring core.
pub type Result<T> = std::result::Result<T, ColoringError>;

/// Errors raised while building or coloring a [`Multigraph`](crate::graph::Multigraph).
///
/// Any of these aborts the current coloring run. The graph instance must be
/// rebuilt from the original input afterwards.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// Malformed input or a handle that does not belong to the edge/graph.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    /// Neither an alternating-path swap nor a fan rotation could free a color.
    #[error("recoloring failed for edge {edge}: {reason}")]
    RecoloringFailure {
        /// Edge that could not be colored.
        edge: EdgeId,
        /// Which step gave up.
        reason: String,
    },
    /// Per-vertex color bookkeeping disagrees with the incident edges.
    #[error("inconsistent color state at vertex {vertex}: {detail}")]
    InconsistentColorState {
        /// Vertex whose counts are off.
        vertex: VertexId,
        /// What did not match.
        detail: String,
    },
    /// The instance already went through a coloring run.
    #[error("graph was already used by a coloring run; rebuild it from the input")]
    GraphConsumed,
}

impl ColoringError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ColoringError::InvalidGraph(message.into())
    }

    pub(crate) fn recoloring(edge: EdgeId, reason: impl Into<String>) -> Self {
        ColoringError::RecoloringFailure {
            edge,
            reason: reason.into(),
        }
    }

    pub(crate) fn inconsistent(vertex: VertexId, detail: impl Into<String>) -> Self {
        ColoringError::InconsistentColorState {
            vertex,
            detail: detail.into(),
        }
    }
}

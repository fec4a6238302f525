//! Proper edge coloring of undirected multigraphs within Vizing's Δ+1 bound.
//!
//! Build a [`Multigraph`] from ordered [`EdgeRecord`]s, call
//! [`Multigraph::edge_coloring`], then read the triples back with
//! [`Multigraph::colored_edges`]:
//!
//! ```
//! use vizing::{EdgeRecord, Multigraph};
//!
//! let records = [
//!     EdgeRecord::new(1, 1, 2, 1),
//!     EdgeRecord::new(2, 2, 3, 1),
//!     EdgeRecord::new(3, 1, 3, 1),
//! ];
//! let mut graph = Multigraph::from_records(records)?;
//! let report = graph.edge_coloring()?;
//! assert_eq!(report.colors_used, 3);
//! assert!(vizing::verify::verify_coloring(&graph).success);
//! # Ok::<(), vizing::ColoringError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod coloring;
pub mod graph;
pub mod logging;
pub mod types;
pub mod verify;

mod error;

pub use coloring::{ColoringOptions, ColoringReport, PaletteGrowth};
pub use error::{ColoringError, Result};
pub use graph::{Edge, GraphStats, Multigraph, Palette, Vertex};
pub use types::{Color, ColoredEdge, EdgeId, EdgeIx, EdgeRecord, VertexId, VertexIx};

#![forbid(unsafe_code)]

//! Command-line support: edge-list input and coloring output.
//!
//! The coloring core never reads files. These helpers turn files into
//! [`EdgeRecord`](crate::types::EdgeRecord)s and write the resulting
//! [`ColoredEdge`](crate::types::ColoredEdge) triples back out.

/// Edge-list readers and coloring writers.
///
/// Handles the plain `x y m` layout, CSV with a header
/// row, and JSON output.
pub mod edge_list;

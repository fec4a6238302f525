//! Identifier and color newtypes shared by the graph, coloring and IO layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// External vertex identifier, as it appears in the input edge list.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub i64);

/// External edge identifier, as it appears in the input edge list.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

/// An edge color. Palette colors start at 1; [`Color::NONE`] marks an
/// uncolored edge and never appears in a finished coloring.
#[derive(
    Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Sentinel for "not colored yet".
    pub const NONE: Color = Color(0);

    /// Returns true when this is a real palette color.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

/// Arena handle of a vertex inside a [`Multigraph`](crate::graph::Multigraph).
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct VertexIx(pub(crate) u32);

/// Arena handle of an edge inside a [`Multigraph`](crate::graph::Multigraph).
///
/// Edge handles follow insertion order, so comparing two handles compares
/// the order in which the edges were added.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeIx(pub(crate) u32);

impl VertexIx {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeIx {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Position of the edge in insertion order.
    pub fn position(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VertexId {
    fn from(value: i64) -> Self {
        VertexId(value)
    }
}

impl From<i64> for EdgeId {
    fn from(value: i64) -> Self {
        EdgeId(value)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        value.0
    }
}

/// One input edge record: `(ident, x, y, m)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge identifier.
    #[serde(rename = "id")]
    pub ident: EdgeId,
    /// First endpoint.
    pub x: VertexId,
    /// Second endpoint.
    pub y: VertexId,
    /// Multiplicity annotation. Carried through, never expanded.
    pub m: i64,
}

impl EdgeRecord {
    /// Builds a record from raw integers.
    pub fn new(ident: i64, x: i64, y: i64, m: i64) -> Self {
        Self {
            ident: EdgeId(ident),
            x: VertexId(x),
            y: VertexId(y),
            m,
        }
    }
}

/// One output triple `(ident, x, y, color)`, plus the carried multiplicity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredEdge {
    /// Edge identifier.
    #[serde(rename = "id")]
    pub ident: EdgeId,
    /// First endpoint.
    pub x: VertexId,
    /// Second endpoint.
    pub y: VertexId,
    /// Multiplicity annotation copied from the input record.
    pub m: i64,
    /// Assigned color.
    pub color: Color,
}

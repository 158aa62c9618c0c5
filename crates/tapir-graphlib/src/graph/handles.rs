//! Integer handles into the vertex and edge arenas.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl VertexId {
    pub(in crate::graph) fn from_index(ix: usize) -> Self {
        Self(ix as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub(in crate::graph) fn from_index(ix: usize) -> Self {
        Self(ix as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

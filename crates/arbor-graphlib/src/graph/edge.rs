//! Weighted directed edges.
//!
//! An edge built while contracting a graph records the id of the edge it stands in for
//! (`parent`). The id refers into the graph the contracted graph was derived from, one
//! level up, and is only meaningful next to that graph.

use super::Vertex;
use crate::error::{Error, Result};
use std::fmt;

/// Position of an edge inside the [`Graph`](super::Graph) that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(in crate::graph) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Vertex,
    to: Vertex,
    weight: f64,
    parent: Option<EdgeId>,
}

impl Edge {
    /// Fails with [`Error::InvalidEdgeWeight`] for negative, NaN or infinite weights.
    pub fn new(from: impl Into<Vertex>, to: impl Into<Vertex>, weight: f64) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        // `!(w >= 0.0)` also rejects NaN.
        if !(weight >= 0.0) || weight.is_infinite() {
            return Err(Error::InvalidEdgeWeight {
                from: from.name().to_string(),
                to: to.name().to_string(),
                weight,
            });
        }
        Ok(Self {
            from,
            to,
            weight,
            parent: None,
        })
    }

    /// An edge of a derived graph that represents edge `parent` of the source graph.
    pub fn derived(
        from: impl Into<Vertex>,
        to: impl Into<Vertex>,
        weight: f64,
        parent: EdgeId,
    ) -> Result<Self> {
        let mut edge = Self::new(from, to, weight)?;
        edge.parent = Some(parent);
        Ok(edge)
    }

    pub fn from(&self) -> &Vertex {
        &self.from
    }

    pub fn to(&self) -> &Vertex {
        &self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// `None` means the edge is its own parent (an input edge).
    pub fn parent(&self) -> Option<EdgeId> {
        self.parent
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {:.2}", self.from, self.to, self.weight)
    }
}

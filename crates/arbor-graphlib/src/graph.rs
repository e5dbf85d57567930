//! Weighted directed graph container.
//!
//! Vertices are kept in insertion order. That order drives every traversal in this crate
//! and in `arbor`, which is what makes tie-breaking between equal-weight edges reproducible.

mod edge;
mod entries;
mod reader;
mod vertex;

pub use edge::{Edge, EdgeId};
pub use reader::read_edge_list;
pub use vertex::Vertex;

use crate::error::{Error, Result};
use entries::Adjacency;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use vertex::AtomicName;

type VertexMap = IndexMap<Vertex, Adjacency, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: VertexMap,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: VertexMap::with_capacity_and_hasher(vertices, FxBuildHasher),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Registers `v` without any incident edge. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, v: impl Into<Vertex>) -> bool {
        let v = v.into();
        if self.vertices.contains_key(&v) {
            return false;
        }
        self.vertices.insert(v, Adjacency::default());
        true
    }

    /// Appends `e` to the outgoing list of its source and the incoming list of its target.
    ///
    /// Parallel edges and self-loops are accepted as-is.
    pub fn add_edge(&mut self, e: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.vertices
            .entry(e.from().clone())
            .or_default()
            .out
            .push(id);
        self.vertices.entry(e.to().clone()).or_default().in_.push(id);
        self.edges.push(e);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v: &Vertex) -> bool {
        self.vertices.contains_key(v)
    }

    /// The atomic vertex called `name`; composite vertices are never matched by name.
    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertices.get_key_value(&AtomicName(name)).map(|(v, _)| v)
    }

    pub fn validate_vertex(&self, v: &Vertex) -> Result<()> {
        self.adjacency(v).map(|_| ())
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.keys()
    }

    pub fn vertex_index(&self, v: &Vertex) -> Option<usize> {
        self.vertices.get_index_of(v)
    }

    pub fn vertex_at(&self, ix: usize) -> Option<&Vertex> {
        self.vertices.get_index(ix).map(|(v, _)| v)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// All edges, flattened from each vertex's outgoing list in vertex insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.vertices
            .values()
            .flat_map(move |adj| adj.out.iter().map(move |&id| (id, &self.edges[id.0])))
    }

    pub fn out_edges<'a>(
        &'a self,
        v: &Vertex,
    ) -> Result<impl Iterator<Item = (EdgeId, &'a Edge)> + use<'a>> {
        let adj = self.adjacency(v)?;
        Ok(adj.out.iter().map(move |&id| (id, &self.edges[id.0])))
    }

    pub fn in_edges<'a>(
        &'a self,
        v: &Vertex,
    ) -> Result<impl Iterator<Item = (EdgeId, &'a Edge)> + use<'a>> {
        let adj = self.adjacency(v)?;
        Ok(adj.in_.iter().map(move |&id| (id, &self.edges[id.0])))
    }

    /// Outgoing edge ids of the vertex at insertion index `ix`; empty when out of range.
    pub fn out_edge_ids_at(&self, ix: usize) -> &[EdgeId] {
        self.vertices
            .get_index(ix)
            .map(|(_, adj)| adj.out.as_slice())
            .unwrap_or(&[])
    }

    pub fn out_degree(&self, v: &Vertex) -> Result<usize> {
        Ok(self.adjacency(v)?.out.len())
    }

    pub fn in_degree(&self, v: &Vertex) -> Result<usize> {
        Ok(self.adjacency(v)?.in_.len())
    }

    pub fn from_edge_list(input: &str) -> Result<Self> {
        read_edge_list(input.as_bytes())
    }

    fn adjacency(&self, v: &Vertex) -> Result<&Adjacency> {
        self.vertices.get(v).ok_or_else(|| Error::UnknownVertex {
            vertex: v.name().to_string(),
        })
    }
}

impl std::str::FromStr for Graph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_edge_list(s)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.vertex_count(), self.edge_count())?;
        for (v, adj) in &self.vertices {
            writeln!(f, "{v}:")?;
            for id in &adj.out {
                writeln!(f, "  {}", self.edges[id.0])?;
            }
        }
        Ok(())
    }
}

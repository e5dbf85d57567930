//! Directed cycle detection.
//!
//! Depth-first search over every vertex in insertion order, each visited once. The search
//! stops at the first back edge to a vertex still on the DFS stack and rebuilds that cycle
//! by walking discovery edges backwards from the closing edge.
//!
//! The walk uses an explicit frame stack, so deep chains do not consume call stack.

use crate::graphlib::{Edge, EdgeId, Graph, Vertex};

/// A directed cycle, listed in backward-walk order: the closing edge first, then each
/// discovery edge leading to it. `vertices[i]` is the target of `edges[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    edges: Vec<EdgeId>,
    vertices: Vec<Vertex>,
}

impl Cycle {
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CycleDetector {
    cycle: Option<Cycle>,
}

struct Search {
    marked: Vec<bool>,
    on_stack: Vec<bool>,
    edge_to: Vec<Option<EdgeId>>,
}

impl CycleDetector {
    pub fn new(g: &Graph) -> Self {
        let n = g.vertex_count();
        let mut search = Search {
            marked: vec![false; n],
            on_stack: vec![false; n],
            edge_to: vec![None; n],
        };

        for start in 0..n {
            if search.marked[start] {
                continue;
            }
            if let Some(cycle) = dfs(g, start, &mut search) {
                return Self { cycle: Some(cycle) };
            }
        }
        Self { cycle: None }
    }

    pub fn has_cycle(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn cycle(&self) -> Option<&Cycle> {
        self.cycle.as_ref()
    }

    pub fn cycle_edges(&self) -> Option<&[EdgeId]> {
        self.cycle.as_ref().map(Cycle::edges)
    }

    pub fn cycle_vertices(&self) -> Option<&[Vertex]> {
        self.cycle.as_ref().map(Cycle::vertices)
    }

    pub fn into_cycle(self) -> Option<Cycle> {
        self.cycle
    }
}

fn dfs(g: &Graph, start: usize, search: &mut Search) -> Option<Cycle> {
    search.marked[start] = true;
    search.on_stack[start] = true;
    // (vertex index, position of the next outgoing edge to explore)
    let mut frames: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let v = frame.0;
        let Some(&id) = g.out_edge_ids_at(v).get(frame.1) else {
            search.on_stack[v] = false;
            frames.pop();
            continue;
        };
        frame.1 += 1;

        let Some(w) = g.edge(id).and_then(|e| g.vertex_index(e.to())) else {
            debug_assert!(false, "adjacency refers to a missing edge or vertex");
            continue;
        };
        if !search.marked[w] {
            search.edge_to[w] = Some(id);
            search.marked[w] = true;
            search.on_stack[w] = true;
            frames.push((w, 0));
        } else if search.on_stack[w] {
            return trace_back(g, id, w, &search.edge_to);
        }
    }
    None
}

fn trace_back(g: &Graph, closing: EdgeId, w: usize, edge_to: &[Option<EdgeId>]) -> Option<Cycle> {
    let start = g.vertex_at(w)?;
    let mut edges: Vec<EdgeId> = Vec::new();
    let mut vertices: Vec<Vertex> = Vec::new();

    let mut f = closing;
    // A cycle visits each vertex at most once.
    for _ in 0..=edge_to.len() {
        let e: &Edge = g.edge(f)?;
        edges.push(f);
        vertices.push(e.to().clone());
        if e.from() == start {
            return Some(Cycle { edges, vertices });
        }
        let from_ix = g.vertex_index(e.from())?;
        f = edge_to.get(from_ix).copied().flatten()?;
    }
    debug_assert!(false, "discovery edges did not lead back to the cycle start");
    None
}

//! Minimum-weight spanning arborescence (Chu-Liu/Edmonds).
//!
//! Each level of the reduction picks the cheapest incoming edge of every non-root vertex.
//! If those picks are acyclic they are the answer for that level. Otherwise the first cycle
//! found is contracted into a composite vertex and the next level works on a new graph in
//! which every edge entering the cycle is cheaper by the weight of the cycle edge it would
//! replace. Edges of a contracted graph carry the id of the edge they stand for one level
//! up, so expanding a level only ever looks at the two graphs adjacent to it.
//!
//! Levels are kept on an explicit stack rather than the call stack; the depth is bounded by
//! the vertex count.

use crate::cycle::{Cycle, CycleDetector};
use crate::graphlib::{Edge, EdgeId, Error, Graph, Result, Vertex};
use rustc_hash::FxBuildHasher;
use std::borrow::Cow;
use std::fmt;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, PartialEq)]
pub struct Arborescence {
    root: Vertex,
    edges: Vec<Edge>,
    weight: f64,
    contractions: usize,
}

impl Arborescence {
    pub fn root(&self) -> &Vertex {
        &self.root
    }

    /// Edges of the input graph forming the arborescence.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Sum of the input weights of [`edges`](Self::edges).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of cycles contracted while solving; never more than `|V| - 1`.
    pub fn contractions(&self) -> usize {
        self.contractions
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The tree edge entering `v`, or `None` for the root and for unknown vertices.
    pub fn parent_of(&self, v: &Vertex) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to() == v)
    }
}

impl fmt::Display for Arborescence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.edges {
            writeln!(f, "{e}")?;
        }
        write!(f, "weight: {:.2}", self.weight)
    }
}

enum Step {
    /// The cheapest incoming edges already form an arborescence of this level's graph.
    Acyclic { edges: Vec<EdgeId> },
    /// A cycle was contracted; `reduced` is the next level's graph.
    Contracted {
        contraction: Contraction,
        reduced: Graph,
    },
}

struct Contraction {
    /// Vertex indices of the cycle members in the contracted level's graph.
    members: HashSet<usize>,
    /// The cycle's edges, as ids in the contracted level's graph.
    edges: Vec<EdgeId>,
}

struct Level<'g> {
    graph: Cow<'g, Graph>,
    contraction: Contraction,
}

/// Computes a minimum-weight spanning arborescence of `graph` rooted at `root`.
///
/// Among equal-weight candidates the first incoming edge in insertion order wins, so
/// repeated calls on the same graph return the same edges.
///
/// # Errors
///
/// - [`Error::RootNotInGraph`] if `root` is not a vertex of `graph`.
/// - [`Error::UnreachableVertex`] if some vertex has no usable incoming edge or cannot be
///   reached from `root`; no partial result is produced.
pub fn solve(graph: &Graph, root: &Vertex) -> Result<Arborescence> {
    let _span = tracing::debug_span!(
        "solve",
        root = %root,
        vertices = graph.vertex_count(),
        edges = graph.edge_count()
    )
    .entered();

    if !graph.contains(root) {
        return Err(Error::RootNotInGraph {
            root: root.name().to_string(),
        });
    }

    let mut pending: Vec<Level<'_>> = Vec::new();
    let mut current: Cow<'_, Graph> = Cow::Borrowed(graph);
    let mut chosen = loop {
        match step(&current, root, pending.len())? {
            Step::Acyclic { edges } => break edges,
            Step::Contracted {
                contraction,
                reduced,
            } => {
                let graph = std::mem::replace(&mut current, Cow::Owned(reduced));
                pending.push(Level { graph, contraction });
            }
        }
    };
    let contractions = pending.len();

    while let Some(level) = pending.pop() {
        chosen = expand(&level.graph, &current, &level.contraction, &chosen);
        current = level.graph;
    }

    let edges: Vec<Edge> = chosen
        .iter()
        .filter_map(|&id| current.edge(id).cloned())
        .collect();
    // An empty `f64` sum is -0.0.
    let weight = edges.iter().map(Edge::weight).fold(0.0, |acc, w| acc + w);
    tracing::debug!(weight, contractions, "arborescence found");

    Ok(Arborescence {
        root: root.clone(),
        edges,
        weight,
        contractions,
    })
}

fn step(graph: &Graph, root: &Vertex, depth: usize) -> Result<Step> {
    let best = select_min_incoming(graph, root)?;
    if depth == 0 {
        check_reachable(graph, root)?;
    }

    let mut candidate = Graph::with_capacity(graph.vertex_count(), graph.vertex_count());
    for &id in best.iter().flatten() {
        let Some(e) = graph.edge(id) else {
            debug_assert!(false, "selected edge missing from graph");
            continue;
        };
        candidate.add_edge(Edge::derived(e.from(), e.to(), e.weight(), id)?);
    }

    let Some(cycle) = CycleDetector::new(&candidate).into_cycle() else {
        tracing::debug!(
            depth,
            vertices = graph.vertex_count(),
            "cheapest incoming edges are acyclic"
        );
        let edges = candidate.edges().filter_map(|(_, e)| e.parent()).collect();
        return Ok(Step::Acyclic { edges });
    };

    let (contraction, reduced) = contract(graph, root, &candidate, &cycle, &best, depth)?;
    Ok(Step::Contracted {
        contraction,
        reduced,
    })
}

/// Cheapest incoming edge of every vertex except `root`, indexed by vertex position.
///
/// Self-loops never belong to an arborescence and are not candidates.
fn select_min_incoming(graph: &Graph, root: &Vertex) -> Result<Vec<Option<EdgeId>>> {
    let mut best: Vec<Option<EdgeId>> = Vec::with_capacity(graph.vertex_count());
    for w in graph.vertices() {
        if w == root {
            best.push(None);
            continue;
        }
        let mut min: Option<(EdgeId, f64)> = None;
        for (id, e) in graph.in_edges(w)? {
            if e.is_self_loop() {
                continue;
            }
            // Strict comparison keeps the first of several equal-weight edges.
            if min.is_none_or(|(_, m)| e.weight() < m) {
                min = Some((id, e.weight()));
            }
        }
        let Some((id, weight)) = min else {
            return Err(Error::UnreachableVertex {
                vertex: w.name().to_string(),
            });
        };
        tracing::trace!(vertex = %w, edge = %id, weight, "cheapest incoming edge");
        best.push(Some(id));
    }
    Ok(best)
}

fn check_reachable(graph: &Graph, root: &Vertex) -> Result<()> {
    let Some(r) = graph.vertex_index(root) else {
        return Err(Error::RootNotInGraph {
            root: root.name().to_string(),
        });
    };
    let mut seen = vec![false; graph.vertex_count()];
    seen[r] = true;
    let mut queue = vec![r];
    while let Some(v) = queue.pop() {
        for &id in graph.out_edge_ids_at(v) {
            let Some(w) = graph.edge(id).and_then(|e| graph.vertex_index(e.to())) else {
                continue;
            };
            if !seen[w] {
                seen[w] = true;
                queue.push(w);
            }
        }
    }

    match seen.iter().position(|s| !s).and_then(|ix| graph.vertex_at(ix)) {
        Some(v) => Err(Error::UnreachableVertex {
            vertex: v.name().to_string(),
        }),
        None => Ok(()),
    }
}

fn contract(
    graph: &Graph,
    root: &Vertex,
    candidate: &Graph,
    cycle: &Cycle,
    best: &[Option<EdgeId>],
    depth: usize,
) -> Result<(Contraction, Graph)> {
    let super_vertex = Vertex::composite(cycle.vertices())?;
    let members: HashSet<usize> = cycle
        .vertices()
        .iter()
        .filter_map(|v| graph.vertex_index(v))
        .collect();
    let cycle_edges: Vec<EdgeId> = cycle
        .edges()
        .iter()
        .filter_map(|&id| candidate.edge(id).and_then(Edge::parent))
        .collect();
    tracing::debug!(
        depth,
        cycle = %super_vertex,
        size = members.len(),
        "contracting cycle"
    );

    let mut reduced = Graph::with_capacity(
        graph.vertex_count().saturating_sub(members.len()) + 1,
        graph.edge_count(),
    );
    for (id, e) in graph.edges() {
        let (Some(from_ix), Some(to_ix)) =
            (graph.vertex_index(e.from()), graph.vertex_index(e.to()))
        else {
            debug_assert!(false, "edge endpoint missing from graph");
            continue;
        };
        let to_in_cycle = members.contains(&to_ix);
        let from = if members.contains(&from_ix) {
            &super_vertex
        } else {
            e.from()
        };
        let to = if to_in_cycle { &super_vertex } else { e.to() };
        if from == to || to == root {
            continue;
        }

        // Entering the cycle at `to` replaces the cycle edge into `to`, which is already paid.
        let weight = if to_in_cycle {
            let paid = best
                .get(to_ix)
                .copied()
                .flatten()
                .and_then(|b| graph.edge(b))
                .map_or(0.0, Edge::weight);
            e.weight() - paid
        } else {
            e.weight()
        };
        reduced.add_edge(Edge::derived(from, to, weight, id)?);
    }
    // Keep both even if no edge reaches them, so infeasibility surfaces on the next level.
    reduced.add_vertex(root);
    reduced.add_vertex(&super_vertex);

    Ok((
        Contraction {
            members,
            edges: cycle_edges,
        },
        reduced,
    ))
}

/// Maps the next level's solution back onto `graph` and completes the contracted cycle.
fn expand(
    graph: &Graph,
    reduced: &Graph,
    contraction: &Contraction,
    chosen: &[EdgeId],
) -> Vec<EdgeId> {
    let mut out: Vec<EdgeId> = Vec::with_capacity(chosen.len() + contraction.edges.len());
    let mut entered: Option<usize> = None;

    for &id in chosen {
        let Some(parent) = reduced.edge(id).and_then(Edge::parent) else {
            debug_assert!(false, "contracted edge has no parent");
            continue;
        };
        if let Some(to_ix) = graph.edge(parent).and_then(|e| graph.vertex_index(e.to())) {
            if contraction.members.contains(&to_ix) {
                entered = Some(to_ix);
            }
        }
        out.push(parent);
    }
    debug_assert!(entered.is_some(), "no tree edge enters the contracted cycle");

    for &id in &contraction.edges {
        let target = graph.edge(id).and_then(|e| graph.vertex_index(e.to()));
        if target != entered {
            out.push(id);
        }
    }
    out
}

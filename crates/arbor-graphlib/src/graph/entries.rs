//! Internal storage entries for [`Graph`](super::Graph).

use super::EdgeId;

/// Outgoing and incoming edge ids of one vertex, in insertion order.
#[derive(Debug, Clone, Default)]
pub(in crate::graph) struct Adjacency {
    pub(in crate::graph) out: Vec<EdgeId>,
    pub(in crate::graph) in_: Vec<EdgeId>,
}

//! Graph container APIs used by `arbor`.
//!
//! The container stores weighted directed edges between named vertices. Vertices may be
//! atomic (one name) or composite (the merged member names of a contracted cycle), which
//! lets the same [`Graph`] type describe both user input and every contracted sub-problem.

#![forbid(unsafe_code)]

pub mod error;
pub mod graph;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, read_edge_list};

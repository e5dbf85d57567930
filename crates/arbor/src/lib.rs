//! Minimum-weight spanning arborescences of weighted directed graphs.
//!
//! [`solve`] runs Chu-Liu/Edmonds: pick the cheapest incoming edge of every non-root
//! vertex, contract the first directed cycle those picks form into a super-vertex, solve the
//! weight-reduced sub-problem, then expand the cycle again.

#![forbid(unsafe_code)]

pub use arbor_graphlib as graphlib;
pub use arbor_graphlib::{Edge, EdgeId, Error, Graph, Result, Vertex};

pub mod arborescence;
pub mod cycle;

pub use arborescence::{Arborescence, solve};
pub use cycle::{Cycle, CycleDetector};

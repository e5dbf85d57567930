pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid weight {weight} on edge {from} -> {to}: weights must be non-negative and not NaN, and infinite weights are rejected as well")]
    InvalidEdgeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("vertex {vertex} is not in graph")]
    UnknownVertex { vertex: String },

    #[error("vertex {vertex} is unreachable from the root; no spanning arborescence exists")]
    UnreachableVertex { vertex: String },

    #[error("root vertex {root} is not in graph")]
    RootNotInGraph { root: String },

    #[error("a composite vertex needs at least one member")]
    EmptyComposite,

    #[error("edge list line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors that prove no arborescence exists for the requested root.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Error::UnreachableVertex { .. } | Error::RootNotInGraph { .. }
        )
    }
}

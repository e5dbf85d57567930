//! Vertex identities.
//!
//! An atomic vertex wraps one name. A composite vertex stands for the merged member names of
//! several vertices (a contracted cycle) and is named by its sorted member names joined with
//! `,`. Identity is the kind plus the member set, so an atomic vertex whose name happens to
//! contain `,` never equals a composite with the same printed name.

use crate::error::{Error, Result};
use indexmap::Equivalent;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct VertexData {
    name: String,
    members: BTreeSet<String>,
    composite: bool,
}

/// Cheap to clone; edges hold their endpoints by value.
#[derive(Clone)]
pub struct Vertex {
    data: Arc<VertexData>,
}

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let members = BTreeSet::from([name.clone()]);
        Self {
            data: Arc::new(VertexData {
                name,
                members,
                composite: false,
            }),
        }
    }

    /// Merges the member names of `parts` into one super-vertex.
    ///
    /// Duplicate names collapse, and nested composites flatten to their atomic members. A
    /// single distinct member yields that atomic vertex.
    pub fn composite<'a>(parts: impl IntoIterator<Item = &'a Vertex>) -> Result<Self> {
        let members: BTreeSet<String> = parts
            .into_iter()
            .flat_map(|v| v.data.members.iter().cloned())
            .collect();
        if members.is_empty() {
            return Err(Error::EmptyComposite);
        }
        let composite = members.len() > 1;
        let name = members.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        Ok(Self {
            data: Arc::new(VertexData {
                name,
                members,
                composite,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.data.members.iter().map(String::as_str)
    }

    pub fn member_count(&self) -> usize {
        self.data.members.len()
    }

    pub fn is_composite(&self) -> bool {
        self.data.composite
    }

    /// True iff every member name of `other` is a member name of `self`.
    pub fn contains(&self, other: &Vertex) -> bool {
        other
            .data
            .members
            .iter()
            .all(|m| self.data.members.contains(m))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.data.members.contains(name)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.data.composite == other.data.composite && self.data.members == other.data.members
    }
}

impl Eq for Vertex {}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data
            .name
            .cmp(&other.data.name)
            .then(self.data.composite.cmp(&other.data.composite))
            .then_with(|| self.data.members.cmp(&other.data.members))
    }
}

// Must hash exactly like `AtomicName` for atomic vertices.
impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.composite.hash(state);
        self.data.name.as_str().hash(state);
    }
}

/// Lookup key matching only the atomic vertex with this name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AtomicName<'a>(pub(crate) &'a str);

impl Hash for AtomicName<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        false.hash(state);
        self.0.hash(state);
    }
}

impl Equivalent<Vertex> for AtomicName<'_> {
    fn equivalent(&self, key: &Vertex) -> bool {
        !key.data.composite && key.data.name == self.0
    }
}

impl From<&str> for Vertex {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&Vertex> for Vertex {
    fn from(v: &Vertex) -> Self {
        v.clone()
    }
}

impl From<String> for Vertex {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.composite {
            write!(f, "Vertex{{{}}}", self.data.name)
        } else {
            write!(f, "Vertex({})", self.data.name)
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.name)
    }
}

use serde::Serialize;

use crate::spec::SolidKind;

use super::vertex::VertexId;

/// An undirected edge between two vertices.
///
/// Stored canonically with `start < end`, so two edges over the same
/// vertex pair compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Lower vertex index.
    pub start: VertexId,
    /// Higher vertex index.
    pub end: VertexId,
    /// Euclidean length of the edge.
    pub length: f64,
}

impl Edge {
    /// Creates the canonical edge between `a` and `b`.
    ///
    /// Returns `None` for a self-loop.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId, length: f64) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                start: a,
                end: b,
                length,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                start: b,
                end: a,
                length,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The vertex pair as `(start, end)`.
    #[must_use]
    pub fn key(&self) -> (VertexId, VertexId) {
        (self.start, self.end)
    }

    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    #[must_use]
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if v == self.start {
            Some(self.end)
        } else if v == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

/// All edges of one solid, sorted by `(start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSet {
    kind: SolidKind,
    edges: Vec<Edge>,
    length: f64,
}

impl EdgeSet {
    /// Wraps a canonical, sorted edge list whose members share `length`.
    #[must_use]
    pub fn new(kind: SolidKind, edges: Vec<Edge>, length: f64) -> Self {
        Self {
            kind,
            edges,
            length,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The common edge length (the minimum vertex distance).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `true` if an edge joins `a` and `b`.
    #[must_use]
    pub fn contains(&self, a: VertexId, b: VertexId) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges
            .binary_search_by(|e| e.key().cmp(&key))
            .is_ok()
    }

    /// Neighbour lists indexed by vertex, for `vertex_count` vertices.
    #[must_use]
    pub fn adjacency(&self, vertex_count: usize) -> Vec<Vec<VertexId>> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for edge in &self.edges {
            if let Some(list) = adjacency.get_mut(edge.start.index()) {
                list.push(edge.end);
            }
            if let Some(list) = adjacency.get_mut(edge.end.index()) {
                list.push(edge.start);
            }
        }
        adjacency
    }

    /// Consumes the set, returning the edge list.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

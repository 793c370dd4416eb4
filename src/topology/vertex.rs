use serde::Serialize;

use crate::error::{Result, ShapeError};
use crate::math::Point3;
use crate::spec::SolidKind;

/// Index of a vertex within its [`VertexSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Position of the vertex in the owning set.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A vertex of a solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    /// The 3D position of the vertex.
    pub point: Point3,
}

impl Vertex {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}

/// Deduplicated vertices of one solid, in lexicographic `(x, y, z)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSet {
    kind: SolidKind,
    vertices: Vec<Vertex>,
}

impl VertexSet {
    /// Wraps an already deduplicated, ordered vertex list.
    #[must_use]
    pub fn new(kind: SolidKind, vertices: Vec<Vertex>) -> Self {
        Self { kind, vertices }
    }

    #[must_use]
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `id` indexes a vertex of this set.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// Checks that every id refers to a vertex of this set.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidReference`] for the first unknown id.
    pub fn check_ids(&self, ids: impl IntoIterator<Item = VertexId>) -> Result<()> {
        match ids.into_iter().find(|id| !self.contains(*id)) {
            Some(id) => Err(ShapeError::InvalidReference {
                solid: self.kind,
                vertex: id.index(),
                vertex_count: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }

    /// Position of the vertex `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this set; stages call
    /// [`check_ids`](Self::check_ids) first.
    #[must_use]
    pub fn point(&self, id: VertexId) -> &Point3 {
        &self.vertices[id.index()].point
    }

    /// Iterates over `(id, vertex)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    /// Consumes the set, returning the vertex list.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

use serde::Serialize;

use crate::math::Vector3;
use crate::spec::SolidKind;

use super::vertex::VertexId;

/// A planar polygonal face.
///
/// The vertex cycle winds counter-clockwise when viewed from outside the
/// solid, so it follows the right-hand rule about `normal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    /// Vertex cycle, starting at the smallest index.
    pub vertices: Vec<VertexId>,
    /// Unit outward normal of the face plane.
    pub normal: Vector3,
}

impl Face {
    /// Creates a face, rotating the cycle so it starts at its smallest
    /// vertex index. Winding is preserved.
    #[must_use]
    pub fn new(mut vertices: Vec<VertexId>, normal: Vector3) -> Self {
        if let Some(pos) = vertices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| **v)
            .map(|(i, _)| i)
        {
            vertices.rotate_left(pos);
        }
        Self { vertices, normal }
    }

    /// Number of vertices in the cycle.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.vertices.len()
    }

    /// The unordered vertex set, as a sorted list. Two faces with equal keys
    /// are the same face regardless of rotation or reflection.
    #[must_use]
    pub fn key(&self) -> Vec<VertexId> {
        let mut key = self.vertices.clone();
        key.sort_unstable();
        key
    }

    /// Directed boundary edges `(v[i], v[i + 1])`, wrapping around.
    pub fn directed_edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// All faces of one solid, ordered by their sorted vertex sets.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSet {
    kind: SolidKind,
    faces: Vec<Face>,
}

impl FaceSet {
    #[must_use]
    pub fn new(kind: SolidKind, faces: Vec<Face>) -> Self {
        Self { kind, faces }
    }

    #[must_use]
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Consumes the set, returning the face list.
    #[must_use]
    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }
}

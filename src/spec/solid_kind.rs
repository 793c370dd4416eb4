use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ShapeError;

/// One of the five regular convex polyhedra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidKind {
    Tetrahedron,
    Hexahedron,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl SolidKind {
    /// All five solids in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Tetrahedron,
        Self::Hexahedron,
        Self::Octahedron,
        Self::Dodecahedron,
        Self::Icosahedron,
    ];

    /// Lowercase canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Hexahedron => "hexahedron",
            Self::Octahedron => "octahedron",
            Self::Dodecahedron => "dodecahedron",
            Self::Icosahedron => "icosahedron",
        }
    }

    /// Number of vertices the solid has.
    #[must_use]
    pub const fn vertex_count(self) -> usize {
        match self {
            Self::Tetrahedron => 4,
            Self::Hexahedron => 8,
            Self::Octahedron => 6,
            Self::Dodecahedron => 20,
            Self::Icosahedron => 12,
        }
    }

    /// Number of edges the solid has.
    #[must_use]
    pub const fn edge_count(self) -> usize {
        match self {
            Self::Tetrahedron => 6,
            Self::Hexahedron | Self::Octahedron => 12,
            Self::Dodecahedron | Self::Icosahedron => 30,
        }
    }

    /// Number of faces the solid has.
    #[must_use]
    pub const fn face_count(self) -> usize {
        match self {
            Self::Tetrahedron => 4,
            Self::Hexahedron => 6,
            Self::Octahedron => 8,
            Self::Dodecahedron => 12,
            Self::Icosahedron => 20,
        }
    }

    /// Number of vertices (and edges) per face.
    #[must_use]
    pub const fn face_degree(self) -> usize {
        match self {
            Self::Tetrahedron | Self::Octahedron | Self::Icosahedron => 3,
            Self::Hexahedron => 4,
            Self::Dodecahedron => 5,
        }
    }

    /// Number of edges meeting at each vertex.
    #[must_use]
    pub const fn vertex_degree(self) -> usize {
        match self {
            Self::Tetrahedron | Self::Hexahedron | Self::Dodecahedron => 3,
            Self::Octahedron => 4,
            Self::Icosahedron => 5,
        }
    }
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolidKind {
    type Err = ShapeError;

    /// Parses a solid name, case-insensitively. `cube` is accepted as an
    /// alias for the hexahedron.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "cube" {
            return Ok(Self::Hexahedron);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| ShapeError::InvalidSpec(format!("unknown solid `{s}`")))
    }
}

use thiserror::Error;

use crate::spec::SolidKind;

/// Top-level error type for the shape pipeline.
///
/// Every variant raised by a pipeline stage carries the solid it failed
/// for, so a failure in one solid can be reported without touching the
/// others.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    #[error("{solid}: generated {found} distinct vertices, expected {expected}")]
    Generation {
        solid: SolidKind,
        expected: usize,
        found: usize,
    },

    #[error("{solid}: ambiguous edge length: {detail}")]
    AmbiguousEdgeLength { solid: SolidKind, detail: String },

    #[error("{solid}: Euler characteristic violated: V={vertices} E={edges} F={faces}")]
    Topology {
        solid: SolidKind,
        vertices: usize,
        edges: usize,
        faces: usize,
    },

    #[error("{solid}: {quantity} disagrees beyond tolerance (range {min} .. {max})")]
    NumericTolerance {
        solid: SolidKind,
        quantity: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{solid}: reference to vertex {vertex} outside a set of {vertex_count}")]
    InvalidReference {
        solid: SolidKind,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShapeError {
    /// The solid whose pipeline raised this error, if any.
    #[must_use]
    pub fn solid(&self) -> Option<SolidKind> {
        match self {
            Self::Generation { solid, .. }
            | Self::AmbiguousEdgeLength { solid, .. }
            | Self::Topology { solid, .. }
            | Self::NumericTolerance { solid, .. }
            | Self::InvalidReference { solid, .. } => Some(*solid),
            Self::InvalidSpec(_) | Self::InvalidConfig(_) => None,
        }
    }

    /// Process exit code for the command-line front end: `1` for an
    /// unrecognized solid, `2` for any computation failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidSpec(_) => 1,
            _ => 2,
        }
    }
}

/// `V − E + F`, computed without unsigned underflow.
#[must_use]
pub fn euler_characteristic(vertices: usize, edges: usize, faces: usize) -> i64 {
    let to_i64 = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
    to_i64(vertices) - to_i64(edges) + to_i64(faces)
}

/// Convenience type alias for results using [`ShapeError`].
pub type Result<T> = std::result::Result<T, ShapeError>;

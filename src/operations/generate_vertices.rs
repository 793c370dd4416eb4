use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::math::{lexicographic_cmp, points_approx_eq, Point3, TOLERANCE};
use crate::spec::{CoordinateSpec, SymmetryRow};
use crate::topology::{Vertex, VertexSet};

/// Expands a [`CoordinateSpec`] into its deduplicated vertex set.
///
/// Each symmetry row contributes the Cartesian product of its axis
/// value-sets. Candidates from all rows are pooled, merged when every
/// component agrees within the tolerance, and sorted lexicographically.
pub struct GenerateVertices<'a> {
    spec: &'a CoordinateSpec,
    tolerance: f64,
}

impl<'a> GenerateVertices<'a> {
    /// Creates a new `GenerateVertices` operation with the default tolerance.
    #[must_use]
    pub fn new(spec: &'a CoordinateSpec) -> Self {
        Self {
            spec,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the relative tolerance used to merge coincident candidates.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Generation`] if the number of distinct vertices
    /// differs from the solid's known vertex count.
    pub fn execute(&self) -> Result<VertexSet> {
        let kind = self.spec.kind();

        let mut candidates = 0usize;
        let mut unique: Vec<Point3> = Vec::new();
        for row in self.spec.rows() {
            for point in expand_row(row) {
                candidates += 1;
                if !unique
                    .iter()
                    .any(|q| points_approx_eq(&point, q, self.tolerance))
                {
                    unique.push(point);
                }
            }
        }

        if unique.len() != kind.vertex_count() {
            return Err(ShapeError::Generation {
                solid: kind,
                expected: kind.vertex_count(),
                found: unique.len(),
            });
        }

        unique.sort_by(lexicographic_cmp);
        debug!(solid = %kind, candidates, vertices = unique.len(), "generated vertices");

        Ok(VertexSet::new(
            kind,
            unique.into_iter().map(Vertex::new).collect(),
        ))
    }
}

/// Cartesian product of a row's three axis value-sets.
fn expand_row(row: &SymmetryRow) -> Vec<Point3> {
    let [xs, ys, zs] = row.axes();
    let mut points = Vec::with_capacity(row.candidate_count());
    for &x in xs {
        for &y in ys {
            for &z in zs {
                // `+ 0.0` folds -0.0 into 0.0
                points.push(Point3::new(x + 0.0, y + 0.0, z + 0.0));
            }
        }
    }
    points
}

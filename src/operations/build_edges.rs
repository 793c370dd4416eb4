use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::math::{approx_eq, comparison_scale, TOLERANCE};
use crate::topology::{Edge, EdgeSet, VertexId, VertexSet};

/// Fraction of ε below which two distances count as the same value.
pub const DISTINCT_RESOLUTION: f64 = 1e-3;

/// Multiple of ε the next distance class must keep from `d_min`.
pub const SEPARATION: f64 = 2.0;

/// Derives the edge set from pairwise vertex distances.
///
/// Every pair at the minimum positive distance `d_min` becomes an edge.
/// The minimum must form a single well-separated distance class:
///
/// - every distance within ε of `d_min` must be the same value, agreeing
///   with `d_min` to `DISTINCT_RESOLUTION · ε`;
/// - the nearest distance outside that window must lie more than
///   `SEPARATION · ε` above `d_min`.
pub struct BuildEdges<'a> {
    vertices: &'a VertexSet,
    tolerance: f64,
}

impl<'a> BuildEdges<'a> {
    /// Creates a new `BuildEdges` operation with the default tolerance.
    #[must_use]
    pub fn new(vertices: &'a VertexSet) -> Self {
        Self {
            vertices,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the relative tolerance for distance comparisons.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation, returning edges sorted by `(start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::AmbiguousEdgeLength`] if no positive distance
    /// exists or the minimum distance class is not well separated.
    pub fn execute(&self) -> Result<EdgeSet> {
        let kind = self.vertices.kind();
        let ambiguous = |detail: String| ShapeError::AmbiguousEdgeLength {
            solid: kind,
            detail,
        };

        let points: Vec<_> = self.vertices.iter().map(|(id, v)| (id, v.point)).collect();
        let mut pairs: Vec<(VertexId, VertexId, f64)> = Vec::new();
        for (i, (a, pa)) in points.iter().enumerate() {
            for (b, pb) in &points[i + 1..] {
                pairs.push((*a, *b, (pb - pa).norm()));
            }
        }

        let mut distances: Vec<f64> = pairs
            .iter()
            .map(|&(_, _, d)| d)
            .filter(|d| !approx_eq(*d, 0.0, self.tolerance))
            .collect();
        distances.sort_by(f64::total_cmp);

        let Some(&d_min) = distances.first() else {
            return Err(ambiguous(format!(
                "no positive distance among {} vertices",
                points.len()
            )));
        };

        let within = |d: f64, factor: f64| {
            d - d_min <= factor * self.tolerance * comparison_scale(d, d_min)
        };

        let window_end = distances
            .iter()
            .copied()
            .take_while(|&d| within(d, 1.0))
            .last()
            .unwrap_or(d_min);
        if !within(window_end, DISTINCT_RESOLUTION) {
            return Err(ambiguous(format!(
                "distinct distances {d_min} and {window_end} lie within tolerance"
            )));
        }

        if let Some(&next) = distances.iter().find(|&&d| !within(d, 1.0)) {
            if within(next, SEPARATION) {
                return Err(ambiguous(format!(
                    "next distance {next} is not separated from {d_min}"
                )));
            }
        }

        let edges: Vec<Edge> = pairs
            .into_iter()
            .filter(|&(_, _, d)| approx_eq(d, d_min, self.tolerance))
            .filter_map(|(a, b, d)| Edge::new(a, b, d))
            .collect();

        debug!(solid = %kind, edges = edges.len(), edge_length = d_min, "built edges");

        Ok(EdgeSet::new(kind, edges, d_min))
    }
}

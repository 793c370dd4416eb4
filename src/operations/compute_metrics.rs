use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ShapeError};
use crate::math::polygon_3d::polygon_area_3d;
use crate::math::{comparison_scale, Point3, TOLERANCE};
use crate::topology::{EdgeSet, FaceSet, VertexSet};

/// Scalar metrics of a solid centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub radius: f64,
    pub inradius: f64,
    pub midradius: f64,
    pub edge_length: f64,
    pub face_area: f64,
    pub surf_area: f64,
    pub volume: f64,
}

/// Computes [`Metrics`] from validated vertices, edges and faces.
///
/// Face area uses the regular polygon formula `k·s² / (4·tan(π/k))` and is
/// cross-checked against the measured area of every face. Volume is the
/// sum of the pyramids from the center to each face, `r_in · A / 3`.
pub struct ComputeMetrics<'a> {
    vertices: &'a VertexSet,
    edges: &'a EdgeSet,
    faces: &'a FaceSet,
    tolerance: f64,
}

impl<'a> ComputeMetrics<'a> {
    /// Creates a new `ComputeMetrics` operation with the default tolerance.
    #[must_use]
    pub fn new(vertices: &'a VertexSet, edges: &'a EdgeSet, faces: &'a FaceSet) -> Self {
        Self {
            vertices,
            edges,
            faces,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the relative tolerance for agreement checks.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidReference`] if an edge or face names an
    /// unknown vertex, or [`ShapeError::NumericTolerance`] if the
    /// circumradius, edge lengths, midradius, insphere distances or face
    /// areas disagree.
    pub fn execute(&self) -> Result<Metrics> {
        let kind = self.vertices.kind();
        self.vertices
            .check_ids(self.edges.edges().iter().flat_map(|e| [e.start, e.end]))?;
        self.vertices
            .check_ids(self.faces.faces().iter().flat_map(|f| f.vertices.iter().copied()))?;

        let radius = self.uniform(
            "circumradius",
            self.vertices.vertices().iter().map(|v| v.point.coords.norm()),
        )?;

        let edge_length = self.edges.length();
        self.uniform(
            "edge length",
            std::iter::once(edge_length).chain(self.edges.edges().iter().map(|e| e.length)),
        )?;

        let midradius = self.uniform(
            "midradius",
            self.edges.edges().iter().map(|e| {
                let a = self.vertices.point(e.start);
                let b = self.vertices.point(e.end);
                ((a.coords + b.coords) * 0.5).norm()
            }),
        )?;

        let inradius = self.uniform(
            "insphere distance",
            self.faces.faces().iter().filter_map(|f| {
                f.vertices
                    .first()
                    .map(|id| self.vertices.point(*id).coords.dot(&f.normal).abs())
            }),
        )?;

        let face_area = regular_polygon_area(kind.face_degree(), edge_length);
        self.uniform(
            "face area",
            std::iter::once(face_area).chain(self.faces.faces().iter().map(|f| {
                let points: Vec<Point3> =
                    f.vertices.iter().map(|id| *self.vertices.point(*id)).collect();
                polygon_area_3d(&points, &f.normal)
            })),
        )?;

        #[allow(clippy::cast_precision_loss)]
        let surf_area = self.faces.len() as f64 * face_area;
        let volume = inradius * surf_area / 3.0;

        debug!(solid = %kind, radius, inradius, surf_area, volume, "computed metrics");

        Ok(Metrics {
            radius,
            inradius,
            midradius,
            edge_length,
            face_area,
            surf_area,
            volume,
        })
    }

    /// Returns the first value if every value agrees with it within tolerance.
    fn uniform(&self, quantity: &'static str, values: impl Iterator<Item = f64>) -> Result<f64> {
        let kind = self.vertices.kind();
        let mut first = None;
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for value in values {
            first.get_or_insert(value);
            min = min.min(value);
            max = max.max(value);
        }

        match first {
            Some(value) if max - min <= self.tolerance * comparison_scale(min, max) => Ok(value),
            _ => Err(ShapeError::NumericTolerance {
                solid: kind,
                quantity,
                min,
                max,
            }),
        }
    }
}

/// Area of a regular `k`-gon with side `side`: `k·s² / (4·tan(π/k))`.
#[must_use]
pub fn regular_polygon_area(k: usize, side: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let k = k as f64;
    k * side * side / (4.0 * (PI / k).tan())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::{AssembleFaces, BuildEdges, GenerateVertices};
    use crate::spec::{spec_for, SolidKind};
    use crate::math::Vector3;
    use crate::topology::{Edge, Face, Vertex, VertexId};
    use approx::assert_relative_eq;

    fn metrics_of(kind: SolidKind) -> Metrics {
        let vertices = GenerateVertices::new(spec_for(kind).unwrap())
            .execute()
            .unwrap();
        let edges = BuildEdges::new(&vertices).execute().unwrap();
        let faces = AssembleFaces::new(&vertices, &edges).execute().unwrap();
        ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap()
    }

    #[test]
    fn regular_polygon_areas() {
        assert_relative_eq!(regular_polygon_area(3, 1.0), 3f64.sqrt() / 4.0, epsilon = 1e-12);
        assert_relative_eq!(regular_polygon_area(4, 2.0), 4.0, epsilon = 1e-12);
        let pentagon = (5.0 * (5.0 + 2.0 * 5f64.sqrt())).sqrt() / 4.0;
        assert_relative_eq!(regular_polygon_area(5, 1.0), pentagon, epsilon = 1e-12);
    }

    #[test]
    fn cube_metrics() {
        let m = metrics_of(SolidKind::Hexahedron);
        assert_relative_eq!(m.radius, 3f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.edge_length, 2.0, epsilon = 1e-12);
        assert_relative_eq!(m.face_area, 4.0, epsilon = 1e-12);
        assert_relative_eq!(m.surf_area, 24.0, epsilon = 1e-12);
        assert_relative_eq!(m.inradius, 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.midradius, 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.volume, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn tetrahedron_volume_matches_closed_form() {
        let m = metrics_of(SolidKind::Tetrahedron);
        let a = m.edge_length;
        assert_relative_eq!(a, 2.0, epsilon = 1e-12);
        assert_relative_eq!(m.volume, a.powi(3) / (6.0 * 2f64.sqrt()), epsilon = 1e-12);
        assert_relative_eq!(m.radius, a * 6f64.sqrt() / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn octahedron_volume_matches_closed_form() {
        let m = metrics_of(SolidKind::Octahedron);
        let a = m.edge_length;
        assert_relative_eq!(a, 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.volume, 2f64.sqrt() / 3.0 * a.powi(3), epsilon = 1e-12);
        assert_relative_eq!(m.radius, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn dodecahedron_volume_matches_closed_form() {
        let m = metrics_of(SolidKind::Dodecahedron);
        let a = m.edge_length;
        let s5 = 5f64.sqrt();
        assert_relative_eq!(m.volume, (15.0 + 7.0 * s5) / 4.0 * a.powi(3), epsilon = 1e-9);
        assert_relative_eq!(m.radius, 3f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn icosahedron_volume_matches_closed_form() {
        let m = metrics_of(SolidKind::Icosahedron);
        let a = m.edge_length;
        let s5 = 5f64.sqrt();
        assert_relative_eq!(a, 2.0, epsilon = 1e-12);
        assert_relative_eq!(m.volume, 5.0 * (3.0 + s5) / 12.0 * a.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn uneven_radius_is_rejected() {
        let vertices = VertexSet::new(
            SolidKind::Tetrahedron,
            vec![
                Vertex::new(Point3::new(1.0, 0.0, 0.0)),
                Vertex::new(Point3::new(0.0, 2.0, 0.0)),
            ],
        );
        let edges = EdgeSet::new(SolidKind::Tetrahedron, vec![], 5f64.sqrt());
        let faces = FaceSet::new(SolidKind::Tetrahedron, vec![]);
        let err = ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            ShapeError::NumericTolerance {
                quantity: "circumradius",
                ..
            }
        ));
    }

    fn cube_stages() -> (VertexSet, EdgeSet, FaceSet) {
        let vertices = GenerateVertices::new(spec_for(SolidKind::Hexahedron).unwrap())
            .execute()
            .unwrap();
        let edges = BuildEdges::new(&vertices).execute().unwrap();
        let faces = AssembleFaces::new(&vertices, &edges).execute().unwrap();
        (vertices, edges, faces)
    }

    fn tolerance_quantity(err: &ShapeError) -> &'static str {
        match err {
            ShapeError::NumericTolerance { quantity, .. } => *quantity,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn uneven_midradius_is_rejected() {
        let (vertices, _, faces) = cube_stages();
        // (-1,-1,-1)-(1,1,1) has the stored length of a real edge but its
        // midpoint is the center
        let edges = EdgeSet::new(
            SolidKind::Hexahedron,
            vec![
                Edge::new(VertexId(0), VertexId(1), 2.0).unwrap(),
                Edge::new(VertexId(0), VertexId(7), 2.0).unwrap(),
            ],
            2.0,
        );
        let err = ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap_err();
        assert_eq!(tolerance_quantity(&err), "midradius");
    }

    #[test]
    fn uneven_insphere_distance_is_rejected() {
        let (vertices, edges, faces) = cube_stages();
        let mut skewed = faces.faces().to_vec();
        skewed[0].normal *= 0.5;
        let faces = FaceSet::new(SolidKind::Hexahedron, skewed);
        let err = ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap_err();
        assert_eq!(tolerance_quantity(&err), "insphere distance");
    }

    #[test]
    fn face_area_mismatch_is_rejected() {
        let (vertices, edges, faces) = cube_stages();
        let mut crossed = faces.faces().to_vec();
        // Same plane and first vertex, but the cycle now crosses itself
        let v = crossed[0].vertices.clone();
        crossed[0] = Face {
            vertices: vec![v[0], v[2], v[1], v[3]],
            normal: crossed[0].normal,
        };
        let faces = FaceSet::new(SolidKind::Hexahedron, crossed);
        let err = ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap_err();
        assert_eq!(tolerance_quantity(&err), "face area");
    }

    #[test]
    fn face_with_unknown_vertex_is_reported() {
        let (vertices, edges, faces) = cube_stages();
        let mut extended = faces.faces().to_vec();
        extended.push(Face {
            vertices: vec![VertexId(0), VertexId(1), VertexId(42)],
            normal: Vector3::z(),
        });
        let faces = FaceSet::new(SolidKind::Hexahedron, extended);
        let err = ComputeMetrics::new(&vertices, &edges, &faces)
            .execute()
            .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidReference { vertex: 42, .. }));
    }
}

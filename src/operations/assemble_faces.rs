use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::error::{euler_characteristic, Result, ShapeError};
use crate::geometry::Plane;
use crate::math::polygon_3d::{centroid, is_coplanar, newell_normal, point_in_polygon_3d};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{EdgeSet, Face, FaceSet, VertexId, VertexSet};

/// Derives the planar faces of a solid from its vertices and edges.
///
/// Neighbours of every vertex are ordered counter-clockwise in the plane
/// tangent to the vertex's outward direction. Each directed edge is then
/// walked, turning at every vertex onto the neighbour just before the one
/// it came from, which keeps the face on the left. A closed walk becomes a
/// face when it has the solid's face degree, is planar, and encloses no
/// other vertex.
pub struct AssembleFaces<'a> {
    vertices: &'a VertexSet,
    edges: &'a EdgeSet,
    tolerance: f64,
}

impl<'a> AssembleFaces<'a> {
    /// Creates a new `AssembleFaces` operation with the default tolerance.
    #[must_use]
    pub fn new(vertices: &'a VertexSet, edges: &'a EdgeSet) -> Self {
        Self {
            vertices,
            edges,
            tolerance: TOLERANCE,
        }
    }

    /// Sets the relative tolerance for coplanarity and containment tests.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvalidReference`] if an edge names an unknown
    /// vertex, or [`ShapeError::Topology`] if the accepted faces do not
    /// satisfy `V − E + F = 2`.
    pub fn execute(&self) -> Result<FaceSet> {
        let kind = self.vertices.kind();
        self.vertices
            .check_ids(self.edges.edges().iter().flat_map(|e| [e.start, e.end]))?;
        let rotation = self.rotation_system();

        let mut used: HashSet<(VertexId, VertexId)> = HashSet::new();
        let mut faces: BTreeMap<Vec<VertexId>, Face> = BTreeMap::new();

        for edge in self.edges.edges() {
            for (from, to) in [(edge.start, edge.end), (edge.end, edge.start)] {
                if used.contains(&(from, to)) {
                    continue;
                }
                let Some(cycle) = trace_cycle(from, to, &rotation, &mut used) else {
                    warn!(solid = %kind, ?from, ?to, "face walk did not close");
                    continue;
                };
                match self.accept(cycle) {
                    Some(face) => {
                        faces.entry(face.key()).or_insert(face);
                    }
                    None => warn!(solid = %kind, ?from, ?to, "rejected traced cycle"),
                }
            }
        }

        let (v, e, f) = (self.vertices.len(), self.edges.len(), faces.len());
        if euler_characteristic(v, e, f) != 2 {
            return Err(ShapeError::Topology {
                solid: kind,
                vertices: v,
                edges: e,
                faces: f,
            });
        }

        debug!(solid = %kind, faces = f, "assembled faces");
        Ok(FaceSet::new(kind, faces.into_values().collect()))
    }

    /// Neighbours of each vertex, sorted counter-clockwise about the
    /// vertex's outward direction.
    fn rotation_system(&self) -> Vec<Vec<VertexId>> {
        let adjacency = self.edges.adjacency(self.vertices.len());
        self.vertices
            .iter()
            .zip(adjacency)
            .map(|((_, vertex), mut neighbours)| {
                let center = vertex.point;
                let Some(tangent) = Plane::from_normal(center, center.coords, f64::EPSILON)
                else {
                    return neighbours;
                };
                neighbours.sort_by(|a, b| {
                    let angle = |id: &VertexId| {
                        let (u, v) = tangent.project_to_uv(self.vertices.point(*id));
                        v.atan2(u)
                    };
                    angle(a).total_cmp(&angle(b))
                });
                neighbours
            })
            .collect()
    }

    /// Validates a traced cycle and orients it outward.
    fn accept(&self, mut cycle: Vec<VertexId>) -> Option<Face> {
        let degree = self.vertices.kind().face_degree();
        if cycle.len() != degree {
            return None;
        }

        let points: Vec<Point3> = cycle.iter().map(|id| *self.vertices.point(*id)).collect();
        let center = centroid(&points);
        let mut normal = newell_normal(&points);
        let plane = Plane::from_normal(center, normal, f64::EPSILON)?;
        if !is_coplanar(&points, &plane, self.tolerance) {
            return None;
        }

        // A vertex on or inside the polygon means the cycle is not minimal
        let extent = points
            .iter()
            .map(|p| (p - center).norm())
            .fold(1.0_f64, f64::max);
        let encloses_other = self
            .vertices
            .iter()
            .filter(|(id, _)| !cycle.contains(id))
            .any(|(_, v)| {
                plane.signed_distance(&v.point).abs() <= self.tolerance * extent
                    && point_in_polygon_3d(&v.point, &points, &plane, self.tolerance)
            });
        if encloses_other {
            return None;
        }

        normal = *plane.normal();
        if normal.dot(&center.coords) < 0.0 {
            cycle.reverse();
            normal = -normal;
        }
        Some(Face::new(cycle, normal))
    }
}

/// Walks the face to the left of the directed edge `from -> to`.
///
/// Marks every directed edge it traverses in `used`. Returns `None` if the
/// walk hits a vertex missing from the rotation system or does not close
/// within as many steps as there are vertices.
fn trace_cycle(
    from: VertexId,
    to: VertexId,
    rotation: &[Vec<VertexId>],
    used: &mut HashSet<(VertexId, VertexId)>,
) -> Option<Vec<VertexId>> {
    let mut cycle = vec![from];
    let (mut prev, mut cur) = (from, to);
    used.insert((prev, cur));

    while cur != from {
        if cycle.len() >= rotation.len() {
            return None;
        }
        cycle.push(cur);
        let ring = rotation.get(cur.index())?;
        let pos = ring.iter().position(|v| *v == prev)?;
        let next = ring[(pos + ring.len() - 1) % ring.len()];
        used.insert((cur, next));
        prev = cur;
        cur = next;
    }
    Some(cycle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::{BuildEdges, GenerateVertices};
    use crate::spec::{spec_for, SolidKind};
    use crate::topology::{Edge, Vertex};
    use approx::assert_relative_eq;

    fn stages(kind: SolidKind) -> (VertexSet, EdgeSet) {
        let vertices = GenerateVertices::new(spec_for(kind).unwrap())
            .execute()
            .unwrap();
        let edges = BuildEdges::new(&vertices).execute().unwrap();
        (vertices, edges)
    }

    fn faces_of(kind: SolidKind) -> (VertexSet, EdgeSet, FaceSet) {
        let (vertices, edges) = stages(kind);
        let faces = AssembleFaces::new(&vertices, &edges).execute().unwrap();
        (vertices, edges, faces)
    }

    #[test]
    fn known_face_counts_and_degrees() {
        for kind in SolidKind::ALL {
            let (_, _, faces) = faces_of(kind);
            assert_eq!(faces.len(), kind.face_count(), "{kind}");
            for face in faces.faces() {
                assert_eq!(face.degree(), kind.face_degree(), "{kind}");
            }
        }
    }

    #[test]
    fn face_boundaries_are_edges() {
        for kind in SolidKind::ALL {
            let (_, edges, faces) = faces_of(kind);
            for face in faces.faces() {
                for (a, b) in face.directed_edges() {
                    assert!(edges.contains(a, b), "{kind}: {a:?}-{b:?}");
                }
            }
        }
    }

    #[test]
    fn each_directed_edge_bounds_exactly_one_face() {
        for kind in SolidKind::ALL {
            let (_, edges, faces) = faces_of(kind);
            let directed: HashSet<_> = faces
                .faces()
                .iter()
                .flat_map(Face::directed_edges)
                .collect();
            assert_eq!(directed.len(), 2 * edges.len(), "{kind}");
        }
    }

    #[test]
    fn cycles_wind_counter_clockwise_from_outside() {
        for kind in SolidKind::ALL {
            let (vertices, _, faces) = faces_of(kind);
            for face in faces.faces() {
                let points: Vec<Point3> = face
                    .vertices
                    .iter()
                    .map(|id| *vertices.point(*id))
                    .collect();
                let winding = newell_normal(&points).normalize();
                assert_relative_eq!(winding, face.normal, epsilon = 1e-9);
                assert!(face.normal.dot(&centroid(&points).coords) > 0.0, "{kind}");
            }
        }
    }

    #[test]
    fn faces_are_planar() {
        for kind in SolidKind::ALL {
            let (vertices, _, faces) = faces_of(kind);
            for face in faces.faces() {
                let p0 = vertices.point(face.vertices[0]);
                for id in &face.vertices {
                    let offset = (vertices.point(*id) - p0).dot(&face.normal);
                    assert!(offset.abs() < 1e-9, "{kind}: offset {offset}");
                }
            }
        }
    }

    #[test]
    fn cube_top_face() {
        let (vertices, _, faces) = faces_of(SolidKind::Hexahedron);
        let top = faces
            .faces()
            .iter()
            .find(|f| f.normal.z > 0.5)
            .unwrap();
        assert_relative_eq!(top.normal, Vector3::z(), epsilon = 1e-12);
        for id in &top.vertices {
            assert_relative_eq!(vertices.point(*id).z, 1.0);
        }
    }

    #[test]
    fn missing_edges_violate_euler() {
        let (vertices, edges) = stages(SolidKind::Hexahedron);
        let mut kept = edges.edges().to_vec();
        kept.truncate(kept.len() - 1);
        let partial = EdgeSet::new(SolidKind::Hexahedron, kept, edges.length());
        let err = AssembleFaces::new(&vertices, &partial).execute().unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Topology {
                solid: SolidKind::Hexahedron,
                ..
            }
        ));
    }

    #[test]
    fn non_minimal_cycle_is_rejected() {
        // A square with its center vertex on the boundary cycle's plane
        let vertices = VertexSet::new(
            SolidKind::Hexahedron,
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, 1.0)),
                Vertex::new(Point3::new(-1.0, 1.0, 1.0)),
                Vertex::new(Point3::new(0.0, 0.0, 1.0)),
                Vertex::new(Point3::new(1.0, -1.0, 1.0)),
                Vertex::new(Point3::new(1.0, 1.0, 1.0)),
            ],
        );
        let edges = EdgeSet::new(SolidKind::Hexahedron, vec![], 2.0);
        let faces = AssembleFaces::new(&vertices, &edges);
        let cycle = vec![VertexId(0), VertexId(3), VertexId(4), VertexId(1)];
        assert!(faces.accept(cycle).is_none());

        let without_center = VertexSet::new(
            SolidKind::Hexahedron,
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, 1.0)),
                Vertex::new(Point3::new(-1.0, 1.0, 1.0)),
                Vertex::new(Point3::new(1.0, -1.0, 1.0)),
                Vertex::new(Point3::new(1.0, 1.0, 1.0)),
            ],
        );
        let faces = AssembleFaces::new(&without_center, &edges);
        let cycle = vec![VertexId(0), VertexId(2), VertexId(3), VertexId(1)];
        let face = faces.accept(cycle).unwrap();
        assert_relative_eq!(face.normal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn edge_to_unknown_vertex_is_reported() {
        let (vertices, edges) = stages(SolidKind::Tetrahedron);
        let mut kept = edges.edges().to_vec();
        kept.push(Edge::new(VertexId(0), VertexId(99), edges.length()).unwrap());
        let broken = EdgeSet::new(SolidKind::Tetrahedron, kept, edges.length());
        let err = AssembleFaces::new(&vertices, &broken).execute().unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidReference {
                vertex: 99,
                vertex_count: 4,
                ..
            }
        ));
    }

    #[test]
    fn wrong_degree_cycle_is_rejected() {
        let (vertices, edges) = stages(SolidKind::Hexahedron);
        let faces = AssembleFaces::new(&vertices, &edges);
        assert!(faces.accept(vec![VertexId(0), VertexId(1), VertexId(3)]).is_none());
    }
}

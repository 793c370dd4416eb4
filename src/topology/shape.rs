use serde::Serialize;

use crate::operations::Metrics;
use crate::spec::SolidKind;

use super::{Edge, EdgeSet, Face, FaceSet, Vertex, VertexSet};

/// Complete geometric record of one Platonic solid.
///
/// Built once from the immutable outputs of every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeData {
    pub kind: SolidKind,
    /// Circumradius: distance from the center to every vertex.
    pub radius: f64,
    /// Insphere radius: distance from the center to every face plane.
    pub inradius: f64,
    /// Midsphere radius: distance from the center to every edge midpoint.
    pub midradius: f64,
    pub edge_length: f64,
    pub volume: f64,
    /// Area of a single face.
    pub face_area: f64,
    /// Total surface area.
    pub surf_area: f64,
    pub vert_count: usize,
    pub edge_count: usize,
    pub face_count: usize,
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
}

impl ShapeData {
    /// Assembles the record from the stage outputs.
    #[must_use]
    pub fn new(vertices: VertexSet, edges: EdgeSet, faces: FaceSet, metrics: Metrics) -> Self {
        Self {
            kind: vertices.kind(),
            radius: metrics.radius,
            inradius: metrics.inradius,
            midradius: metrics.midradius,
            edge_length: metrics.edge_length,
            volume: metrics.volume,
            face_area: metrics.face_area,
            surf_area: metrics.surf_area,
            vert_count: vertices.len(),
            edge_count: edges.len(),
            face_count: faces.len(),
            vertices: vertices.into_vertices(),
            edges: edges.into_edges(),
            faces: faces.into_faces(),
        }
    }

    /// `V − E + F`; always `2` for a record built by the pipeline.
    #[must_use]
    pub fn euler_characteristic(&self) -> i64 {
        crate::error::euler_characteristic(self.vert_count, self.edge_count, self.face_count)
    }
}

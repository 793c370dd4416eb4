//! Pipeline stages, leaves first.

mod assemble_faces;
mod build_edges;
mod compute_metrics;
mod generate_vertices;
mod pipeline;

pub use assemble_faces::AssembleFaces;
pub use build_edges::BuildEdges;
pub use compute_metrics::{regular_polygon_area, ComputeMetrics, Metrics};
pub use generate_vertices::GenerateVertices;
pub use pipeline::{compute_all, compute_all_with, compute_shape, PipelineStage, ShapePipeline};

//! Exact vertices, edges, faces and metrics of the five Platonic solids,
//! generated from compact symmetry-based coordinate specifications.
//!
//! ```no_run
//! use shape_geom::{compute_shape, SolidKind};
//!
//! let cube = compute_shape(SolidKind::Hexahedron)?;
//! assert_eq!(cube.vert_count + cube.face_count, cube.edge_count + 2);
//! # Ok::<(), shape_geom::ShapeError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod spec;
pub mod topology;

pub use config::PipelineConfig;
pub use error::{Result, ShapeError};
pub use operations::{compute_all, compute_all_with, compute_shape, ShapePipeline};
pub use spec::SolidKind;
pub use topology::ShapeData;

pub mod edge;
pub mod face;
pub mod shape;
pub mod vertex;

pub use edge::{Edge, EdgeSet};
pub use face::{Face, FaceSet};
pub use shape::ShapeData;
pub use vertex::{Vertex, VertexId, VertexSet};

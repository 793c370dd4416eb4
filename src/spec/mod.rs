//! Symmetry-based coordinate specifications for the five Platonic solids.

mod coordinate_spec;
mod solid_kind;

pub use coordinate_spec::{spec_for, CoordinateSpec, SymmetryRow};
pub use solid_kind::SolidKind;

use std::f64::consts::FRAC_1_SQRT_2;
use std::sync::LazyLock;

use crate::error::{Result, ShapeError};
use crate::math::{PHI, PSI};

use super::SolidKind;

/// One representative coordinate pattern of a solid.
///
/// Each axis holds the set of values that coordinate may take; the
/// Cartesian product of the three sets yields one candidate vertex per
/// tuple. A singleton fixes the axis, `{v, −v}` doubles the branching.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryRow {
    axes: [Vec<f64>; 3],
}

impl SymmetryRow {
    /// Creates a row from its three axis value-sets.
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Self { axes: [x, y, z] }
    }

    /// The value-sets for the x, y and z axes.
    #[must_use]
    pub fn axes(&self) -> &[Vec<f64>; 3] {
        &self.axes
    }

    /// Number of candidate vertices the row expands to.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.axes.iter().map(Vec::len).product()
    }
}

/// Immutable symmetry specification of one solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpec {
    kind: SolidKind,
    rows: Vec<SymmetryRow>,
}

impl CoordinateSpec {
    /// Creates a specification from explicit rows.
    #[must_use]
    pub fn new(kind: SolidKind, rows: Vec<SymmetryRow>) -> Self {
        Self { kind, rows }
    }

    /// The solid this specification generates.
    #[must_use]
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    /// The symmetry rows, in table order.
    #[must_use]
    pub fn rows(&self) -> &[SymmetryRow] {
        &self.rows
    }
}

fn fixed(v: f64) -> Vec<f64> {
    vec![v]
}

fn signed(v: f64) -> Vec<f64> {
    vec![v, -v]
}

static SPEC_TABLE: LazyLock<Vec<CoordinateSpec>> = LazyLock::new(|| {
    let long = 1.0 + PSI;
    let short = 1.0 - PSI * PSI;

    vec![
        CoordinateSpec::new(
            SolidKind::Tetrahedron,
            vec![
                SymmetryRow::new(signed(1.0), fixed(0.0), fixed(-FRAC_1_SQRT_2)),
                SymmetryRow::new(fixed(0.0), signed(1.0), fixed(FRAC_1_SQRT_2)),
            ],
        ),
        CoordinateSpec::new(
            SolidKind::Hexahedron,
            vec![SymmetryRow::new(signed(1.0), signed(1.0), signed(1.0))],
        ),
        CoordinateSpec::new(
            SolidKind::Octahedron,
            vec![
                SymmetryRow::new(signed(1.0), fixed(0.0), fixed(0.0)),
                SymmetryRow::new(fixed(0.0), signed(1.0), fixed(0.0)),
                SymmetryRow::new(fixed(0.0), fixed(0.0), signed(1.0)),
            ],
        ),
        CoordinateSpec::new(
            SolidKind::Dodecahedron,
            vec![
                SymmetryRow::new(fixed(0.0), signed(long), signed(short)),
                SymmetryRow::new(signed(long), signed(short), fixed(0.0)),
                SymmetryRow::new(signed(short), fixed(0.0), signed(long)),
                SymmetryRow::new(signed(1.0), signed(1.0), signed(1.0)),
            ],
        ),
        CoordinateSpec::new(
            SolidKind::Icosahedron,
            vec![
                SymmetryRow::new(fixed(0.0), signed(1.0), signed(PHI)),
                SymmetryRow::new(signed(1.0), signed(PHI), fixed(0.0)),
                SymmetryRow::new(signed(PHI), fixed(0.0), signed(1.0)),
            ],
        ),
    ]
});

/// Looks up the built-in specification for `kind`.
///
/// # Errors
///
/// Returns [`ShapeError::InvalidSpec`] if the table has no entry for `kind`.
pub fn spec_for(kind: SolidKind) -> Result<&'static CoordinateSpec> {
    SPEC_TABLE
        .iter()
        .find(|spec| spec.kind == kind)
        .ok_or_else(|| ShapeError::InvalidSpec(format!("no coordinate spec for {kind}")))
}

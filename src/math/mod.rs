pub mod polygon_3d;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default relative tolerance for floating-point comparisons.
///
/// Every equality, coplanarity and distance test in the pipeline goes
/// through [`approx_eq`] with this value (or the one configured in
/// [`PipelineConfig`](crate::config::PipelineConfig)).
pub const TOLERANCE: f64 = 1e-9;

/// The golden ratio `φ = (1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// The golden ratio conjugate `ψ = (−1 + √5) / 2 = 1 / φ`.
pub const PSI: f64 = 0.618_033_988_749_895;

/// Scale used for relative comparisons: `max(1, |a|, |b|)`.
#[inline]
#[must_use]
pub fn comparison_scale(a: f64, b: f64) -> f64 {
    a.abs().max(b.abs()).max(1.0)
}

/// Returns `true` if `a` and `b` agree within `tolerance`, relative to
/// [`comparison_scale`].
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * comparison_scale(a, b)
}

/// Component-wise [`approx_eq`] for two points.
#[must_use]
pub fn points_approx_eq(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    a.coords
        .iter()
        .zip(b.coords.iter())
        .all(|(x, y)| approx_eq(*x, *y, tolerance))
}

/// Lexicographic `(x, y, z)` ordering using [`f64::total_cmp`].
#[must_use]
pub fn lexicographic_cmp(a: &Point3, b: &Point3) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

use crate::geometry::Plane;

use super::{Point3, Vector3};

/// Returns `true` if `point`, assumed to lie in `plane`, is inside the
/// polygon or within `tolerance` of its boundary.
///
/// The polygon is flattened into the plane's UV frame and tested with an
/// even-odd crossing count along the +U ray.
#[must_use]
pub fn point_in_polygon_3d(
    point: &Point3,
    polygon: &[Point3],
    plane: &Plane,
    tolerance: f64,
) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let target = plane.project_to_uv(point);
    let ring: Vec<(f64, f64)> = polygon.iter().map(|p| plane.project_to_uv(p)).collect();
    let sides = || ring.iter().zip(ring.iter().cycle().skip(1));

    if sides().any(|(a, b)| near_segment(target, *a, *b, tolerance)) {
        return true;
    }
    sides().filter(|(a, b)| crosses_ray(target, **a, **b)).count() % 2 == 1
}

/// Whether the side `a`-`b` straddles the horizontal through `t` to its right.
fn crosses_ray(t: (f64, f64), a: (f64, f64), b: (f64, f64)) -> bool {
    if (a.1 > t.1) == (b.1 > t.1) {
        return false;
    }
    let u_at = a.0 + (t.1 - a.1) * (b.0 - a.0) / (b.1 - a.1);
    u_at > t.0
}

/// Whether `t` is within `tolerance` (scaled by the side length) of the
/// segment `a`-`b`.
fn near_segment(t: (f64, f64), a: (f64, f64), b: (f64, f64), tolerance: f64) -> bool {
    let side = (b.0 - a.0, b.1 - a.1);
    let rel = (t.0 - a.0, t.1 - a.1);
    let len_sq = side.0 * side.0 + side.1 * side.1;
    let param = if len_sq > 0.0 {
        ((rel.0 * side.0 + rel.1 * side.1) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gap = (rel.0 - param * side.0).hypot(rel.1 - param * side.1);
    gap <= tolerance * len_sq.sqrt().max(1.0)
}

/// Newell's method: a (non-normalized) normal whose direction follows the
/// winding of `points` and whose length is twice the polygon area.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Area of a planar polygon, measured along the unit `normal`.
///
/// Half the Newell normal projected onto `normal`, so a self-crossing
/// cycle loses the area its lobes cancel.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    0.5 * newell_normal(points).dot(normal).abs()
}

/// Centroid (vertex average) of a point set.
#[must_use]
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let count = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / count)
}

/// Returns `true` if every point lies within `tolerance` of `plane`,
/// relative to the polygon's extent.
#[must_use]
pub fn is_coplanar(points: &[Point3], plane: &Plane, tolerance: f64) -> bool {
    let extent = points
        .iter()
        .map(|p| (p - plane.origin()).norm())
        .fold(1.0_f64, f64::max);
    points
        .iter()
        .all(|p| plane.signed_distance(p).abs() <= tolerance * extent)
}

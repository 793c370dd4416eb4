use crate::math::{Point3, Vector3};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and a unit normal, with two orthonormal
/// in-plane directions (`u_dir`, `v_dir`) such that `u_dir × v_dir = normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically. Returns `None`
    /// if the normal is shorter than `min_length`.
    #[must_use]
    pub fn from_normal(origin: Point3, normal: Vector3, min_length: f64) -> Option<Self> {
        let len = normal.norm();
        if len < min_length {
            return None;
        }
        let normal = normal / len;

        // Seed U from the axis least aligned with the normal
        let mut axis = Vector3::zeros();
        axis[normal.iamin()] = 1.0;
        let u_dir = (axis - normal * normal.dot(&axis)).normalize();
        let v_dir = normal.cross(&u_dir);

        Some(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Projects a point onto the plane's UV coordinate system.
    #[must_use]
    pub fn project_to_uv(&self, point: &Point3) -> (f64, f64) {
        let diff = point - self.origin;
        (diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_is_right_handed() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::new(1.0, 2.0, 3.0), 1e-12)
            .unwrap();
        let n = plane.u_dir().cross(plane.v_dir());
        assert_relative_eq!(n, *plane.normal(), epsilon = 1e-12);
        assert_relative_eq!(plane.u_dir().dot(plane.v_dir()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn signed_distance_from_origin() {
        let plane =
            Plane::from_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z(), 1e-12).unwrap();
        assert_relative_eq!(plane.signed_distance(&Point3::origin()), -2.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(5.0, -1.0, 3.0)), 1.0);
    }

    #[test]
    fn frame_for_axis_normals() {
        for normal in [Vector3::x(), -Vector3::y(), Vector3::z()] {
            let plane = Plane::from_normal(Point3::origin(), normal, 1e-12).unwrap();
            assert_relative_eq!(plane.u_dir().cross(plane.v_dir()), normal, epsilon = 1e-12);
            assert_relative_eq!(plane.u_dir().dot(&normal), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_normal_rejected() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros(), 1e-12).is_none());
    }
}

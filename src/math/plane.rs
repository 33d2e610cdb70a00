//! Planes and point classification.

use super::scalar::{self, Scalar};
use super::vec3::Vec3;

/// Side of a plane a point lies on.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    Behind = 0,
    InFront = 1,
    OnPlane = 2,
}

/// A plane through `point` with unit `normal`. The half-space the normal
/// points into is "in front".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    coplanar: (Vec3, Vec3),
}

impl Plane {
    /// Plane through `point`. `normal` is normalized here.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            point,
            normal,
            coplanar: coplanar_vectors(normal),
        }
    }

    /// Plane through `a` with normal `(a - b) x (c - b)`.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::from_point_normal(a, (a - b).cross(c - b))
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Two unit vectors lying in the plane, orthogonal to each other.
    pub fn coplanar_vectors(&self) -> (Vec3, Vec3) {
        self.coplanar
    }

    /// Classifies `p`. The plane-to-point vector is normalized before the
    /// epsilon test, so the on-plane tolerance is angular.
    pub fn test_point(&self, p: Vec3) -> PlaneSide {
        let dist = p - self.point;
        if dist.is_zero() {
            return PlaneSide::OnPlane;
        }
        let d = dist.normalize().dot(self.normal);
        if scalar::is_zero(d) {
            PlaneSide::OnPlane
        } else if d > 0.0 {
            PlaneSide::InFront
        } else {
            PlaneSide::Behind
        }
    }

    /// Signed distance of `p` from the plane, positive in front.
    pub fn signed_distance(&self, p: Vec3) -> Scalar {
        (p - self.point).dot(self.normal)
    }
}

fn coplanar_vectors(normal: Vec3) -> (Vec3, Vec3) {
    let temp = (normal + Vec3::new(4129.0, 4133.0, 4139.0)).normalize();
    let a = normal.cross(temp).normalize();
    let b = normal.cross(a).normalize();
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_classification() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(plane.test_point(Vec3::new(5.0, 6.0, 3.0)), PlaneSide::InFront);
        assert_eq!(plane.test_point(Vec3::new(5.0, 6.0, -3.0)), PlaneSide::Behind);
        assert_eq!(plane.test_point(Vec3::new(5.0, 6.0, 0.0)), PlaneSide::OnPlane);
        assert_eq!(plane.test_point(Vec3::ZERO), PlaneSide::OnPlane);
    }

    #[test]
    fn test_side_discriminants() {
        assert_eq!(PlaneSide::Behind as u8, 0);
        assert_eq!(PlaneSide::InFront as u8, 1);
        assert_eq!(PlaneSide::OnPlane as u8, 2);
    }

    #[test]
    fn test_far_points_use_angular_tolerance() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::UP);
        // 1e-3 above the plane but a million units away: angle below epsilon
        assert_eq!(plane.test_point(Vec3::new(1e6, 1e-3, 0.0)), PlaneSide::OnPlane);
        assert_eq!(plane.test_point(Vec3::new(1.0, 1e-3, 0.0)), PlaneSide::InFront);
    }

    #[test]
    fn test_from_points_normal_direction() {
        let plane = Plane::from_points(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::ZERO,
            Vec3::new(1.0, -1.0, 1.0),
        );
        assert_relative_eq!(plane.normal(), Vec3::new(0.0, 1.0, 1.0).normalize());
        assert_eq!(plane.test_point(Vec3::FORWARD), PlaneSide::InFront);
    }

    #[test]
    fn test_coplanar_vectors_are_orthonormal() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::new(1.0, 2.0, -3.0));
        let (a, b) = plane.coplanar_vectors();
        let n = plane.normal();
        assert_relative_eq!(a.magnitude(), 1.0);
        assert_relative_eq!(b.magnitude(), 1.0);
        assert_relative_eq!(a.dot(n), 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.dot(n), 0.0, epsilon = 1e-12);
        assert_relative_eq!(a.dot(b), 0.0, epsilon = 1e-12);
    }
}

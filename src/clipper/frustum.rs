//! Camera-space view frustum.

use super::clip_triangle_against_planes;
use crate::math::{Plane, PlaneSide, Scalar, Vec3};
use crate::triangle::Triangle;

/// Five inward-facing planes bounding what the camera sees. There is no far
/// plane.
///
/// The side planes pass through the camera origin and the corners of the
/// view plane at `z = view_plane_z`, which spans `[-aspect, aspect]`
/// horizontally and `[-1, 1]` vertically.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [Plane; 5],
}

impl Frustum {
    pub fn new(aspect_ratio: Scalar, view_plane_z: Scalar, near_z: Scalar) -> Self {
        let origin = Vec3::ZERO;
        let bottom_left = Vec3::new(-aspect_ratio, -1.0, view_plane_z);
        let bottom_right = Vec3::new(aspect_ratio, -1.0, view_plane_z);
        let top_left = Vec3::new(-aspect_ratio, 1.0, view_plane_z);
        let top_right = Vec3::new(aspect_ratio, 1.0, view_plane_z);

        Self {
            planes: [
                Plane::from_point_normal(Vec3::new(0.0, 0.0, near_z), Vec3::FORWARD),
                Plane::from_points(top_left, origin, bottom_left),
                Plane::from_points(bottom_right, origin, top_right),
                Plane::from_points(top_right, origin, top_left),
                Plane::from_points(bottom_left, origin, bottom_right),
            ],
        }
    }

    /// Near, left, right, top, bottom.
    pub fn planes(&self) -> &[Plane; 5] {
        &self.planes
    }

    /// True unless `p` is behind one of the planes.
    pub fn contains(&self, p: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.test_point(p) != PlaneSide::Behind)
    }

    /// The parts of `triangle` inside the frustum.
    pub fn clip(&self, triangle: &Triangle) -> Vec<Triangle> {
        clip_triangle_against_planes(triangle, &self.planes)
    }
}

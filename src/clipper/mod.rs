//! Triangle clipping against planes.
//!
//! Sutherland-Hodgman restricted to triangles: clipping a triangle against
//! one plane yields zero, one or two triangles. Attributes of new vertices
//! are interpolated with barycentric weights against the input triangle.

mod frustum;

pub use frustum::Frustum;

use crate::math::{scalar, Plane, PlaneSide, Vec3};
use crate::triangle::{Triangle, Vertex};

/// Where a segment meets a plane, plus how each endpoint classified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIntersection {
    pub point: Option<Vec3>,
    pub side0: PlaneSide,
    pub side1: PlaneSide,
}

/// Intersection of the segment `p0..p1` with `plane`.
///
/// An endpoint lying on the plane is its own intersection. Endpoints on the
/// same side, and segments parallel to the plane, have none.
pub fn find_intersection_point(p0: Vec3, p1: Vec3, plane: &Plane) -> SegmentIntersection {
    let side0 = plane.test_point(p0);
    let side1 = plane.test_point(p1);
    let point = if side0 == PlaneSide::OnPlane {
        Some(p0)
    } else if side1 == PlaneSide::OnPlane {
        Some(p1)
    } else if side0 == side1 {
        None
    } else {
        let direction = p1 - p0;
        let denom = direction.dot(plane.normal());
        if scalar::is_zero(denom) {
            None
        } else {
            let k = (plane.point() - p0).dot(plane.normal()) / denom;
            Some(p0 + direction * k)
        }
    };
    SegmentIntersection { point, side0, side1 }
}

/// The part of `p0..p1` in front of `plane`, or `None` when nothing in front
/// remains (fully behind, or lying on the plane).
pub fn clip_segment(p0: Vec3, p1: Vec3, plane: &Plane) -> Option<(Vec3, Vec3)> {
    let hit = find_intersection_point(p0, p1, plane);
    let Some(point) = hit.point else {
        return (hit.side0 == PlaneSide::InFront).then_some((p0, p1));
    };
    match (hit.side0, hit.side1) {
        (PlaneSide::InFront, _) => Some((p0, point)),
        (_, PlaneSide::InFront) => Some((point, p1)),
        _ => None,
    }
}

/// Clips `triangle` against `plane`, keeping what is in front of or on it.
///
/// # Panics
///
/// If the walk over the edges emits anything other than three or four
/// vertices, which means the classification was inconsistent.
pub fn clip_triangle(triangle: &Triangle, plane: &Plane) -> Vec<Triangle> {
    let behind = triangle
        .vertices
        .map(|v| plane.test_point(v.position) == PlaneSide::Behind);
    match behind.iter().filter(|&&b| b).count() {
        0 => return vec![*triangle],
        3 => return Vec::new(),
        _ => {}
    }

    let mut emitted: Vec<Vertex> = Vec::with_capacity(4);
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (a, b) = (&triangle.vertices[i], &triangle.vertices[j]);
        match (behind[i], behind[j]) {
            (false, false) => emitted.push(*b),
            (true, true) => {}
            (a_behind, _) => {
                let Some(point) = find_intersection_point(a.position, b.position, plane).point
                else {
                    return Vec::new();
                };
                let weights = triangle.find_weights(point);
                emitted.push(triangle.interpolate_vertex(weights));
                if a_behind {
                    emitted.push(*b);
                }
            }
        }
    }

    let fragments = match emitted.as_slice() {
        &[a, b, c] => vec![Triangle::from_vertices([a, b, c])],
        &[a, b, c, d] => vec![
            Triangle::from_vertices([a, b, c]),
            Triangle::from_vertices([c, d, a]),
        ],
        other => panic!(
            "triangle clipping produced a polygon with {} vertices",
            other.len()
        ),
    };
    fragments.into_iter().filter(Triangle::is_finite).collect()
}

/// Clips `triangle` against every plane in order.
pub fn clip_triangle_against_planes(triangle: &Triangle, planes: &[Plane]) -> Vec<Triangle> {
    let Some((plane, rest)) = planes.split_first() else {
        return vec![*triangle];
    };
    clip_triangle(triangle, plane)
        .iter()
        .flat_map(|t| clip_triangle_against_planes(t, rest))
        .collect()
}

//! Linear interpolation and barycentric weights.

use super::scalar::Scalar;
use super::vec3::Vec3;

/// `a + (b - a) * t`. Values of `t` outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: Scalar) -> Vec3 {
    a.lerp(b, t)
}

/// Normalized [`lerp`].
#[inline]
pub fn nlerp(a: Vec3, b: Vec3, t: Scalar) -> Vec3 {
    lerp(a, b, t).normalize()
}

/// Barycentric weights of `target` against the triangle `(v1, v2, v3)`,
/// projected on the XY plane (signed-area form). Degenerate triangles yield
/// non-finite weights.
#[inline]
pub fn find_weights_2d(v1: Vec3, v2: Vec3, v3: Vec3, target: Vec3) -> [Scalar; 3] {
    let den = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    let t1 = target.x - v3.x;
    let t2 = target.y - v3.y;

    let w1 = ((v2.y - v3.y) * t1 + (v3.x - v2.x) * t2) / den;
    let w2 = ((v3.y - v1.y) * t1 + (v1.x - v3.x) * t2) / den;
    [w1, w2, 1.0 - w1 - w2]
}

/// Barycentric weights of `p` (assumed on the triangle's plane) against
/// `(a, b, c)` in 3D. Degenerate triangles yield non-finite weights.
pub fn find_weights_3d(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> [Scalar; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}

/// Weighted sum of three vectors.
#[inline]
pub fn interpolate3(a: Vec3, b: Vec3, c: Vec3, w: [Scalar; 3]) -> Vec3 {
    a * w[0] + b * w[1] + c * w[2]
}

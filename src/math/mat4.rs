//! 4x4 homogeneous matrix.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Matrices chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! The pipeline itself works on [`Transform`](crate::transform::Transform)
//! values; this type is the homogeneous form used when a caller needs a
//! plain matrix (for example to hand it to another renderer).

use std::ops::Mul;

use super::quaternion::Quaternion;
use super::scalar::Scalar;
use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[Scalar; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[Scalar; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(t: Vec3) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, t.x],
            [0.0, 1.0, 0.0, t.y],
            [0.0, 0.0, 1.0, t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Uniform scale.
    pub fn scaling(s: Scalar) -> Self {
        Mat4::new([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation matrix whose columns are the rotated canonical axes.
    pub fn rotation(q: &Quaternion) -> Self {
        let [x, y, z] = q.to_mat3().columns;
        Mat4::new([
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Scalar {
        self.data[row][col]
    }

    /// Transforms a point (w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::point(p)).to_vec3()
    }

    /// Transforms a direction (w = 0).
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v)).to_vec3()
    }

    fn row(&self, row: usize) -> Vec4 {
        let [x, y, z, w] = self.data[row];
        Vec4::new(x, y, z, w)
    }
}

/// Matrix multiplication: `A * B` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_ignores_directions() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector(Vec3::UP), Vec3::UP);
    }

    #[test]
    fn test_chain_applies_right_to_left() {
        let scale = Mat4::scaling(2.0);
        let translate = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!((translate * scale).transform_point(p), Vec3::new(3.0, 2.0, 2.0));
        assert_eq!((scale * translate).transform_point(p), Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotation_matches_quaternion() {
        let q = Quaternion::from_euler(30.0, -15.0, 60.0);
        let v = Vec3::new(0.5, -2.0, 4.0);
        assert_relative_eq!(Mat4::rotation(&q).transform_vector(v), q.rotate(v));
    }

    #[test]
    fn test_transpose_of_rotation_is_inverse() {
        let r = Mat4::rotation(&Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 40.0));
        let id = r * r.transpose();
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(id.get(row, col), expected, epsilon = 1e-9);
            }
        }
    }
}

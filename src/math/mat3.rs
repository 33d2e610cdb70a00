//! 3x3 matrix stored as three column vectors.

use std::ops::Mul;

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    pub columns: [Vec3; 3],
}

impl Mat3 {
    pub const fn new(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { columns: [x, y, z] }
    }

    /// The canonical basis (right, up, forward).
    pub const fn canonical() -> Self {
        Self::new(Vec3::RIGHT, Vec3::UP, Vec3::FORWARD)
    }

    pub fn column(&self, index: usize) -> Vec3 {
        self.columns[index]
    }

    pub fn right(&self) -> Vec3 {
        self.columns[0]
    }

    pub fn up(&self) -> Vec3 {
        self.columns[1]
    }

    pub fn forward(&self) -> Vec3 {
        self.columns[2]
    }

    pub fn transpose(&self) -> Self {
        let [a, b, c] = self.columns;
        Self::new(
            Vec3::new(a.x, b.x, c.x),
            Vec3::new(a.y, b.y, c.y),
            Vec3::new(a.z, b.z, c.z),
        )
    }

    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        self.columns[0] * v.x + self.columns[1] * v.y + self.columns[2] * v.z
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.mul_vec(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_canonical_is_identity() {
        let v = Vec3::new(1.5, -2.0, 3.0);
        assert_relative_eq!(Mat3::canonical() * v, v);
    }

    #[test]
    fn test_transpose_of_rotation_inverts_it() {
        // 90 degrees about up: right -> back, forward -> right
        let m = Mat3::new(Vec3::BACK, Vec3::UP, Vec3::RIGHT);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(m.transpose() * (m * v), v);
    }
}

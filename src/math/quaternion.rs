//! Unit quaternions for rotations.
//!
//! Angles in the public constructors are in degrees. Products are
//! re-normalized after every multiplication so accumulated rotations do not
//! drift away from unit length.

use std::ops::{Mul, MulAssign};

use super::mat3::Mat3;
use super::scalar::{self, Scalar};
use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub re: Scalar,
    pub im: Vec3,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(1.0, Vec3::ZERO);

    /// Raw constructor, not normalized.
    pub const fn new(re: Scalar, im: Vec3) -> Self {
        Self { re, im }
    }

    /// Raw constructor from `x, y, z` (imaginary) and `w` (real), not normalized.
    pub const fn from_xyzw(x: Scalar, y: Scalar, z: Scalar, w: Scalar) -> Self {
        Self::new(w, Vec3::new(x, y, z))
    }

    /// Rotation of `degrees` around `axis`. The axis does not need to be normalized.
    pub fn from_axis_angle(axis: Vec3, degrees: Scalar) -> Self {
        let half = scalar::deg_to_rad(degrees) / 2.0;
        let axis = axis.try_normalize().unwrap_or(Vec3::ZERO);
        Self::new(half.cos(), axis * half.sin()).normalize()
    }

    /// Euler rotation in degrees, applied yaw (around up), then pitch (around
    /// right), then roll (around forward).
    pub fn from_euler(yaw: Scalar, pitch: Scalar, roll: Scalar) -> Self {
        let yaw = Self::from_axis_angle(Vec3::UP, yaw);
        let pitch = Self::from_axis_angle(Vec3::RIGHT, pitch);
        let roll = Self::from_axis_angle(Vec3::FORWARD, roll);
        yaw * pitch * roll
    }

    /// Rotation taking the canonical basis onto the columns of `m`.
    ///
    /// `m` must be a proper rotation whose trace is greater than -1.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let [x, y, z] = m.columns;
        let qw = (1.0 + x.x + y.y + z.z).sqrt() / 2.0;
        let qw4 = qw * 4.0;
        Self::from_xyzw(
            (y.z - z.y) / qw4,
            (z.x - x.z) / qw4,
            (x.y - y.x) / qw4,
            qw,
        )
    }

    /// Rotation that turns forward into `direction`, keeping up as close to
    /// world up as possible.
    pub fn look_rotation(direction: Vec3) -> Self {
        let z = direction.normalize();
        let x = Vec3::UP.cross(z).normalize();
        let y = z.cross(x);
        Self::from_rotation_matrix(&Mat3::new(x, y, z)).normalize()
    }

    pub fn norm(&self) -> Scalar {
        (self.re * self.re + self.im.dot(self.im)).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let n = self.norm();
        Self::new(self.re / n, self.im / n)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    pub fn dot(&self, other: &Self) -> Scalar {
        self.re * other.re + self.im.dot(other.im)
    }

    pub fn is_zero(&self) -> bool {
        scalar::is_zero(self.re) && self.im.is_zero()
    }

    /// Hamilton product without re-normalization.
    fn product(&self, rhs: &Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im.dot(rhs.im),
            rhs.im * self.re + self.im * rhs.re + self.im.cross(rhs.im),
        )
    }

    /// Rotates `v`, preserving its length. The zero vector is returned as is.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        if v.is_zero() {
            return v;
        }
        let length = v.magnitude();
        let rotated = self
            .product(&Self::new(0.0, v))
            .product(&self.conjugate())
            .im;
        rotated.normalize() * length
    }

    /// Rotated canonical basis.
    pub fn to_mat3(&self) -> Mat3 {
        Mat3::new(
            self.rotate(Vec3::RIGHT),
            self.rotate(Vec3::UP),
            self.rotate(Vec3::FORWARD),
        )
    }

    /// True if both represent the same rotation (`q` and `-q` are equal).
    pub fn approx_eq(&self, other: &Self) -> bool {
        let same = scalar::approx_eq(self.re, other.re) && self.im.approx_eq(other.im);
        let opposite = scalar::approx_eq(self.re, -other.re) && self.im.approx_eq(-other.im);
        same || opposite
    }

    /// Normalized linear interpolation along the shortest arc.
    pub fn nlerp(a: &Self, b: &Self, t: Scalar) -> Self {
        let b = if a.dot(b) < 0.0 {
            Self::new(-b.re, -b.im)
        } else {
            *b
        };
        Self::new(
            a.re + (b.re - a.re) * t,
            a.im + (b.im - a.im) * t,
        )
        .normalize()
    }
}

/// Rotation composition. `a * b` applies `b` first, then `a`.
impl Mul<Quaternion> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Self::Output {
        self.product(&rhs).normalize()
    }
}

impl MulAssign<Quaternion> for Quaternion {
    fn mul_assign(&mut self, rhs: Quaternion) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn thirty_degrees() -> Quaternion {
        Quaternion::from_axis_angle(Vec3::new(2.0, 7.0, 9.0).normalize(), 30.0)
    }

    #[test]
    fn test_accumulated_product_returns_to_identity() {
        let q = thirty_degrees();
        let mut acc = Quaternion::IDENTITY;
        for _ in 0..12 {
            acc = acc * q;
        }
        assert!(acc.approx_eq(&Quaternion::IDENTITY));
    }

    #[test]
    fn test_twelve_rotations_restore_vector() {
        let q = thirty_degrees();
        let v0 = Vec3::new(15.6, -7.1, 13.0);
        let mut v = v0;
        for _ in 0..12 {
            v = q.rotate(v);
        }
        assert!(v.approx_eq(v0));

        v = q.rotate(v);
        assert!(!v.approx_eq(v0));
    }

    #[test]
    fn test_half_turn_around_up() {
        let q = Quaternion::from_axis_angle(Vec3::UP, 180.0);
        assert!(q.approx_eq(&Quaternion::from_xyzw(0.0, 1.0, 0.0, 0.0)));
        assert_relative_eq!(q.rotate(Vec3::new(7.0, 2.0, 6.0)), Vec3::new(-7.0, 2.0, -6.0));
        assert_eq!(q.rotate(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_from_euler_applies_yaw_after_roll() {
        let q = Quaternion::from_euler(-90.0, 0.0, -90.0);
        assert_relative_eq!(q.rotate(Vec3::ONE), Vec3::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn test_negated_quaternion_is_equal() {
        let q = thirty_degrees();
        let neg = Quaternion::new(-q.re, -q.im);
        assert!(q.approx_eq(&neg));
        assert!(!q.approx_eq(&q.conjugate()));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let q = Quaternion::from_euler(12.0, -40.0, 73.0);
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert_relative_eq!(q.rotate(v).magnitude(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matrix_round_trip() {
        let q = Quaternion::from_euler(35.0, 20.0, 0.0);
        let back = Quaternion::from_rotation_matrix(&q.to_mat3());
        assert!(q.approx_eq(&back));
    }

    #[test]
    fn test_look_rotation_points_forward_along_direction() {
        let dir = Vec3::new(1.0, 0.0, 1.0);
        let q = Quaternion::look_rotation(dir);
        assert_relative_eq!(q.rotate(Vec3::FORWARD), dir.normalize());
        assert!(Quaternion::look_rotation(Vec3::FORWARD).approx_eq(&Quaternion::IDENTITY));
    }

    #[test]
    fn test_nlerp_endpoints() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::UP, 90.0);
        assert!(Quaternion::nlerp(&a, &b, 0.0).approx_eq(&a));
        assert!(Quaternion::nlerp(&a, &b, 1.0).approx_eq(&b));
        let mid = Quaternion::nlerp(&a, &b, 0.5);
        assert!(mid.approx_eq(&Quaternion::from_axis_angle(Vec3::UP, 45.0)));
    }
}

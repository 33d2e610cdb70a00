use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};

use super::scalar::{self, Scalar, EPSILON};

/// A 3D vector in a left-handed system (+X right, +Y up, +Z forward).
///
/// Also used for colors, in which case each channel lives in the extended
/// `0..=65535` range (see [`Vec3::from_rgb8`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    /// Largest channel value of an extended-range color.
    pub const COLOR_MAX: Scalar = 65535.0;

    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// Color vector from 8-bit channels, widened to 16 bits (`c * 257`).
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as Scalar * 257.0,
            g as Scalar * 257.0,
            b as Scalar * 257.0,
        )
    }

    /// Narrows an extended-range color to 8-bit channels, rounding to the
    /// nearest value. Out-of-range channels saturate.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = 255.0 / Self::COLOR_MAX;
        [
            (self.x * scale).round() as u8,
            (self.y * scale).round() as u8,
            (self.z * scale).round() as u8,
        ]
    }

    pub fn magnitude(&self) -> Scalar {
        self.dot(*self).sqrt()
    }

    /// Unit vector with the same direction.
    ///
    /// The zero vector yields NaN components; guard with [`Vec3::is_zero`]
    /// or use [`Vec3::try_normalize`].
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn try_normalize(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.normalize())
        }
    }

    pub fn dot(&self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn mul_components(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Angle in radians between two non-zero vectors.
    pub fn angle_between(&self, other: Self) -> Scalar {
        let cos = self.dot(other) / (self.magnitude() * other.magnitude());
        scalar::clamp(-1.0, 1.0, cos).acos()
    }

    /// `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(&self, other: Self, t: Scalar) -> Self {
        *self + (other - *self) * t
    }

    pub fn is_zero(&self) -> bool {
        scalar::is_zero(self.magnitude())
    }

    pub fn approx_eq(&self, other: Self) -> bool {
        scalar::approx_eq(self.x, other.x)
            && scalar::approx_eq(self.y, other.y)
            && scalar::approx_eq(self.z, other.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Clamps every component into `[min, max]`.
    pub fn clamp(&self, min: Scalar, max: Scalar) -> Self {
        Self::new(
            scalar::clamp(min, max, self.x),
            scalar::clamp(min, max, self.y),
            scalar::clamp(min, max, self.z),
        )
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign<Vec3> for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

/// Scalar multiplication of a vector.
impl Mul<Scalar> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Scalar) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<Scalar> for Vec3 {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

/// Scalar division of a vector.
impl Div<Scalar> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: Scalar) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = Scalar;

    fn default_epsilon() -> Scalar {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> Scalar {
        EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

//! Scale-rotate-translate transforms.
//!
//! A [`Transform`] applies a uniform scale, then a rotation, then a
//! translation. Transforms compose with [`Transform::cumulate`] and invert
//! exactly with [`Transform::inverse`], which is what the scene graph relies
//! on to move nodes between parent, world and camera space.
//!
//! Mutating helpers return `&mut Self` for chaining:
//!
//! ```ignore
//! let mut floor = Transform::from_scaling(10.0);
//! floor
//!     .set_rotation(Quaternion::from_axis_angle(Vec3::RIGHT, 90.0))
//!     .translate(Vec3::new(0.0, -1.0, 2.0));
//! ```

use crate::math::{scalar, Mat4, Quaternion, Scalar, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scaling: Scalar,
    pub rotation: Quaternion,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self::new(1.0, Quaternion::IDENTITY, Vec3::ZERO);

    pub const fn new(scaling: Scalar, rotation: Quaternion, translation: Vec3) -> Self {
        Self {
            scaling,
            rotation,
            translation,
        }
    }

    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(1.0, Quaternion::IDENTITY, translation)
    }

    pub const fn from_rotation(rotation: Quaternion) -> Self {
        Self::new(1.0, rotation, Vec3::ZERO)
    }

    pub const fn from_scaling(scaling: Scalar) -> Self {
        Self::new(scaling, Quaternion::IDENTITY, Vec3::ZERO)
    }

    // ============ Composition ============

    /// The transform equivalent to applying `self`, then `next`.
    pub fn cumulate(&self, next: &Transform) -> Transform {
        Transform {
            scaling: self.scaling * next.scaling,
            rotation: next.rotation * self.rotation,
            translation: next.rotation.rotate(self.translation * next.scaling) + next.translation,
        }
    }

    pub fn inverse(&self) -> Transform {
        let scaling = 1.0 / self.scaling;
        let rotation = self.rotation.conjugate();
        Transform {
            scaling,
            rotation,
            translation: rotation.rotate(-self.translation * scaling),
        }
    }

    // ============ Application ============

    pub fn apply_to_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p * self.scaling) + self.translation
    }

    /// Like [`Transform::apply_to_point`] without the translation.
    pub fn apply_to_vector(&self, v: Vec3) -> Vec3 {
        self.rotation.rotate(v * self.scaling)
    }

    // ============ Fluent setters ============

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.translation += delta;
        self
    }

    pub fn set_rotation(&mut self, rotation: Quaternion) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Adds `rotation` after the current one.
    pub fn rotate(&mut self, rotation: Quaternion) -> &mut Self {
        self.rotation = rotation * self.rotation;
        self
    }

    pub fn approx_eq(&self, other: &Transform) -> bool {
        scalar::approx_eq(self.scaling, other.scaling)
            && self.rotation.approx_eq(&other.rotation)
            && self.translation.approx_eq(other.translation)
    }

    /// Homogeneous matrix form: `Translation * Rotation * Scale`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.translation)
            * Mat4::rotation(&self.rotation)
            * Mat4::scaling(self.scaling)
    }
}

impl From<Transform> for Mat4 {
    fn from(t: Transform) -> Self {
        t.to_matrix()
    }
}

//! Small affine/rotation algebra used by the pipeline.

pub mod interpolation;
pub mod mat3;
pub mod mat4;
pub mod plane;
pub mod quaternion;
pub mod scalar;
pub mod vec3;
pub mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use plane::{Plane, PlaneSide};
pub use quaternion::Quaternion;
pub use scalar::{Scalar, EPSILON};
pub use vec3::Vec3;
pub use vec4::Vec4;

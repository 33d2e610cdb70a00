//! Scalar type and epsilon-based comparisons.
//!
//! Every approximate test in the crate (vectors, quaternions, transforms,
//! planes) is built on [`is_zero`] and [`approx_eq`].

/// Floating point type used throughout the pipeline.
pub type Scalar = f64;

/// Tolerance for approximate comparisons.
pub const EPSILON: Scalar = 1e-5;

/// Returns true if `a` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(a: Scalar) -> bool {
    a.abs() < EPSILON
}

/// Returns true if `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: Scalar, b: Scalar) -> bool {
    is_zero(a - b)
}

/// Clamps `value` into `[min, max]`.
#[inline]
pub fn clamp(min: Scalar, max: Scalar, value: Scalar) -> Scalar {
    value.max(min).min(max)
}

#[inline]
pub fn deg_to_rad(degrees: Scalar) -> Scalar {
    degrees.to_radians()
}

#[inline]
pub fn rad_to_deg(radians: Scalar) -> Scalar {
    radians.to_degrees()
}

/// -1, 0 or 1 depending on the sign of `a` (zero within epsilon maps to 0).
#[inline]
pub fn sign(a: Scalar) -> Scalar {
    if is_zero(a) {
        0.0
    } else if a > 0.0 {
        1.0
    } else {
        -1.0
    }
}

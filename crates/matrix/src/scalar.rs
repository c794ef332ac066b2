//! Scalar helpers shared by the matrix algorithms.

use num_traits::Float;

/// Default tolerance for comparisons of single precision results that went
/// through a handful of chained operations.
pub const EPSILON: f32 = 1e-4;

/// `a * b + c`, fused when the target supports it.
#[inline]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    Float::mul_add(a, b, c)
}

/// Determinant of the 2x2 matrix `| a b |` over `| c d |`.
///
/// Written as `a * d + (-b * c)` through [`fma`] so that the determinant and
/// the inverse, which share these minors, round the same way.
#[inline]
pub fn det2(a: f32, b: f32, c: f32, d: f32) -> f32 {
    fma(a, d, -b * c)
}

#[inline]
pub fn to_radians(deg: f32) -> f32 {
    deg * (core::f32::consts::PI / 180.0)
}

#[inline]
pub fn to_degrees(rad: f32) -> f32 {
    rad * (180.0 / core::f32::consts::PI)
}

#[inline]
pub fn sin_cos(rad: f32) -> (f32, f32) {
    Float::sin_cos(rad)
}

#[inline]
pub fn sqrt(v: f32) -> f32 {
    Float::sqrt(v)
}

#[inline]
pub fn tan(rad: f32) -> f32 {
    Float::tan(rad)
}

#[inline]
pub fn abs(v: f32) -> f32 {
    Float::abs(v)
}

#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    abs(a - b) <= epsilon
}

#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

#[test]
fn test_det2() {
    assert_eq!(det2(1.0, 0.0, 0.0, 1.0), 1.0);
    assert_eq!(det2(1.0, 2.0, 3.0, 4.0), -2.0);
    assert_eq!(det2(2.0, 4.0, 1.0, 2.0), 0.0);
}

#[test]
fn test_angles() {
    assert!(approx_eq(to_radians(180.0), core::f32::consts::PI));
    assert!(approx_eq(to_degrees(core::f32::consts::FRAC_PI_2), 90.0));
    let (s, c) = sin_cos(to_radians(90.0));
    assert!(approx_eq(s, 1.0));
    assert!(approx_eq(c, 0.0));
}

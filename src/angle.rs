//! Angle utilities for comparing plane normals.

use nalgebra::Vector3;

/// Unsigned angle in radians between two unit normals, in `[0, π]`.
#[inline]
pub fn normal_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// True when the normals differ by less than `max_angle` radians.
///
/// Both normals are expected to follow the sensor-facing orientation, so the
/// signed angle is used.
#[inline]
pub fn normals_agree(a: &Vector3<f64>, b: &Vector3<f64>, max_angle: f64) -> bool {
    normal_angle(a, b) < max_angle
}

/// Same as [`normal_angle`] for `f32` arrays.
#[inline]
pub fn angle_between(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    let na = (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt().max(1e-6);
    let nb = (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]).sqrt().max(1e-6);
    (dot / (na * nb)).clamp(-1.0, 1.0).acos()
}

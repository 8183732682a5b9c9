// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color with channels nominally in [0, 1].
pub type Color = Vec3;

/// Mirror `direction` about the unit `normal`.
///
/// Returns: direction - 2 (direction . normal) normal
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

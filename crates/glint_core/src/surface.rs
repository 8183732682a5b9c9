//! Surface primitives and their materials.
//!
//! Every surface carries the same field set (position and material); the
//! geometric behavior lives in [`SurfaceKind`] and is dispatched with an
//! exhaustive `match`, so the checkerboard color lookup needs no runtime
//! type checks.

use glint_math::{Color, Interval, Ray, Vec3};
use thiserror::Error;

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Errors reported by [`Surface::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("{name} must lie in [0, 1], got {value}")]
    CoefficientOutOfRange { name: &'static str, value: f32 },

    #[error("specular exponent must be positive, got {0}")]
    NonPositiveExponent(f32),

    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("checkerboard tile size must be positive, got {0}")]
    NonPositiveTileSize(f32),

    #[error("plane normal must be non-zero and finite")]
    DegenerateNormal,
}

/// Shading coefficients shared by every surface type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Color,
    /// Fraction of the reflected ray added back to the local color
    pub reflection: f32,
    /// Diffuse (Lambert) weight
    pub diffuse: f32,
    /// Specular highlight weight
    pub specular_c: f32,
    /// Specular highlight exponent
    pub specular_k: f32,
}

impl Material {
    /// Create a material from explicit coefficients.
    pub const fn new(
        color: Color,
        reflection: f32,
        diffuse: f32,
        specular_c: f32,
        specular_k: f32,
    ) -> Self {
        Self {
            color,
            reflection,
            diffuse,
            specular_c,
            specular_k,
        }
    }

    /// Default sphere material: highly reflective with a sharp highlight.
    pub const fn sphere(color: Color) -> Self {
        Self::new(color, 0.85, 1.0, 0.6, 50.0)
    }

    /// Default plane material: mostly diffuse with a faint reflection.
    pub const fn plane(color: Color) -> Self {
        Self::new(color, 0.15, 0.75, 0.3, 50.0)
    }

    /// Check that every coefficient is in range.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        for (name, value) in [
            ("reflection", self.reflection),
            ("diffuse", self.diffuse),
            ("specular_c", self.specular_c),
        ] {
            if !Interval::UNIT.contains(value) {
                return Err(SurfaceError::CoefficientOutOfRange { name, value });
            }
        }
        if !(self.specular_k > 0.0 && self.specular_k.is_finite()) {
            return Err(SurfaceError::NonPositiveExponent(self.specular_k));
        }
        Ok(())
    }
}

/// Geometry of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceKind {
    /// Sphere centered at the surface position.
    Sphere { radius: f32 },
    /// Infinite plane through the surface position.
    Plane { normal: Vec3 },
    /// Plane tiled with two colors in the local (x, z) coordinates.
    ///
    /// Even cells use the material color, odd cells use `alt_color`.
    Checkerboard {
        normal: Vec3,
        alt_color: Color,
        tile_size: f32,
    },
}

/// A renderable surface: shared position and material plus its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub position: Vec3,
    pub material: Material,
    pub kind: SurfaceKind,
}

impl Surface {
    /// Create a sphere with the default sphere material.
    pub fn sphere(position: Vec3, radius: f32, color: Color) -> Self {
        Self {
            position,
            material: Material::sphere(color),
            kind: SurfaceKind::Sphere { radius },
        }
    }

    /// Create a white plane with the default plane material.
    pub fn plane(position: Vec3, normal: Vec3) -> Self {
        Self::plane_with_color(position, normal, Color::ONE)
    }

    /// Create a plane of the given color.
    pub fn plane_with_color(position: Vec3, normal: Vec3, color: Color) -> Self {
        Self {
            position,
            material: Material::plane(color),
            kind: SurfaceKind::Plane {
                normal: normal.normalize_or_zero(),
            },
        }
    }

    /// Create a checkerboard plane alternating `color1` and `color2`.
    pub fn checkerboard(
        position: Vec3,
        normal: Vec3,
        color1: Color,
        color2: Color,
        tile_size: f32,
    ) -> Self {
        Self {
            position,
            material: Material::plane(color1),
            kind: SurfaceKind::Checkerboard {
                normal: normal.normalize_or_zero(),
                alt_color: color2,
                tile_size,
            },
        }
    }

    /// Replace the whole material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set reflectivity.
    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.material.reflection = reflection;
        self
    }

    /// Set diffuse weight.
    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.material.diffuse = diffuse;
        self
    }

    /// Set specular weight and exponent.
    pub fn with_specular(mut self, specular_c: f32, specular_k: f32) -> Self {
        self.material.specular_c = specular_c;
        self.material.specular_k = specular_k;
        self
    }

    /// Short name of the surface type, for logs and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SurfaceKind::Sphere { .. } => "sphere",
            SurfaceKind::Plane { .. } => "plane",
            SurfaceKind::Checkerboard { .. } => "checkerboard",
        }
    }

    /// Distance along `ray` to the surface, or `None` when there is no
    /// forward intersection.
    ///
    /// Spheres report no hit when the ray starts inside them or when the
    /// center lies behind the origin; only the near side is ever returned.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self.kind {
            SurfaceKind::Sphere { radius } => intersect_sphere(self.position, radius, ray),
            SurfaceKind::Plane { normal } | SurfaceKind::Checkerboard { normal, .. } => {
                intersect_plane(self.position, normal, ray)
            }
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self.kind {
            SurfaceKind::Sphere { .. } => (point - self.position).normalize(),
            SurfaceKind::Plane { normal } | SurfaceKind::Checkerboard { normal, .. } => normal,
        }
    }

    /// Base color at a point on the surface.
    pub fn color_at(&self, point: Vec3) -> Color {
        match self.kind {
            SurfaceKind::Sphere { .. } | SurfaceKind::Plane { .. } => self.material.color,
            SurfaceKind::Checkerboard {
                alt_color,
                tile_size,
                ..
            } => {
                let local = point - self.position;
                let cell_x = (local.x / tile_size).floor() as i64;
                let cell_z = (local.z / tile_size).floor() as i64;
                if (cell_x + cell_z).rem_euclid(2) == 0 {
                    self.material.color
                } else {
                    alt_color
                }
            }
        }
    }

    /// Check material coefficients and geometric parameters.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        self.material.validate()?;
        match self.kind {
            SurfaceKind::Sphere { radius } => {
                if !(radius > 0.0 && radius.is_finite()) {
                    return Err(SurfaceError::NonPositiveRadius(radius));
                }
            }
            SurfaceKind::Plane { normal } => check_normal(normal)?,
            SurfaceKind::Checkerboard {
                normal, tile_size, ..
            } => {
                check_normal(normal)?;
                if !(tile_size > 0.0 && tile_size.is_finite()) {
                    return Err(SurfaceError::NonPositiveTileSize(tile_size));
                }
            }
        }
        Ok(())
    }
}

fn check_normal(normal: Vec3) -> Result<(), SurfaceError> {
    if normal.is_finite() && normal.length_squared() > 0.0 {
        Ok(())
    } else {
        Err(SurfaceError::DegenerateNormal)
    }
}

fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray) -> Option<f32> {
    let oc = center - ray.origin;
    let oc_length = oc.length();
    let projection = oc.dot(ray.direction);

    if oc_length < radius || projection < 0.0 {
        return None;
    }

    // Squared distance from the center to the ray line, then the half chord.
    let m_squared = oc_length * oc_length - projection * projection;
    let q_squared = radius * radius - m_squared;
    if q_squared < 0.0 {
        return None;
    }
    Some(projection - q_squared.sqrt())
}

fn intersect_plane(point: Vec3, normal: Vec3, ray: &Ray) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    Interval::POSITIVE.surrounds(t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_sphere() -> Surface {
        Surface::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::new(1.0, 0.0, 0.0))
    }

    fn board() -> Surface {
        Surface::checkerboard(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::Y,
            Color::ONE,
            Color::ZERO,
            0.2,
        )
    }

    #[test]
    fn test_sphere_hit_near_side() {
        let sphere = red_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let t = sphere.intersect(&ray).expect("ray aimed at center must hit");
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_off_axis_origin() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let sphere = Surface::sphere(center, 0.5, Color::ONE);
        let origin = Vec3::new(-2.0, 0.0, -1.0);
        let ray = Ray::toward(origin, center);

        let t = sphere.intersect(&ray).expect("ray aimed at center must hit");
        let expected = origin.distance(center) - 0.5;
        assert!((t - expected).abs() < 1e-4, "t={} expected={}", t, expected);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = red_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_behind_origin_is_no_hit() {
        let sphere = red_sphere();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_origin_inside_is_no_hit() {
        let sphere = red_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.2), Vec3::Z);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_normal_is_radial() {
        let sphere = red_sphere();
        let n = sphere.normal_at(Vec3::new(0.0, 0.0, 4.0));
        assert!((n - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_plane_hit() {
        let plane = Surface::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);

        let t = plane.intersect(&ray).expect("downward ray must hit the floor");
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let plane = Surface::plane(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(plane.intersect(&ray).is_some());
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Surface::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(plane.intersect(&ray), None);
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let plane = Surface::plane(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(plane.intersect(&ray), None);
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let plane = Surface::plane(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(plane.normal_at(Vec3::new(5.0, 0.0, 2.0)), Vec3::Y);
    }

    #[test]
    fn test_default_materials() {
        let sphere = red_sphere();
        assert_eq!(sphere.material.reflection, 0.85);
        assert_eq!(sphere.material.diffuse, 1.0);
        assert_eq!(sphere.material.specular_c, 0.6);
        assert_eq!(sphere.material.specular_k, 50.0);

        let plane = Surface::plane(Vec3::ZERO, Vec3::Y);
        assert_eq!(plane.material.color, Color::ONE);
        assert_eq!(plane.material.reflection, 0.15);
        assert_eq!(plane.material.diffuse, 0.75);
        assert_eq!(plane.material.specular_c, 0.3);
    }

    #[test]
    fn test_checkerboard_adjacent_tiles_differ() {
        let board = board();
        let tile = 0.2;
        for &(x, z) in &[(0.05, 0.05), (-0.31, 0.47), (1.13, -2.09)] {
            let a = board.color_at(Vec3::new(x, -0.5, z));
            let b = board.color_at(Vec3::new(x + tile, -0.5, z));
            assert_ne!(a, b, "tiles at x={} and x={} should differ", x, x + tile);
        }
    }

    #[test]
    fn test_checkerboard_period_two() {
        let board = board();
        let tile = 0.2;
        for &(x, z) in &[(0.05, 0.05), (-0.31, 0.47), (1.13, -2.09)] {
            let a = board.color_at(Vec3::new(x, -0.5, z));
            let b = board.color_at(Vec3::new(x + 2.0 * tile, -0.5, z));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_checkerboard_negative_cells() {
        let board = board();
        // Cells (-1, 0) and (0, 0) straddle the local origin.
        assert_eq!(board.color_at(Vec3::new(0.1, -0.5, 0.1)), Color::ONE);
        assert_eq!(board.color_at(Vec3::new(-0.1, -0.5, 0.1)), Color::ZERO);
        assert_eq!(board.color_at(Vec3::new(-0.1, -0.5, -0.1)), Color::ONE);
    }

    #[test]
    fn test_plain_surfaces_ignore_position() {
        let plane = Surface::plane_with_color(Vec3::ZERO, Vec3::Y, Color::new(0.2, 0.4, 0.6));
        assert_eq!(plane.color_at(Vec3::new(9.0, 0.0, -3.0)), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_validate() {
        assert!(red_sphere().validate().is_ok());
        assert!(board().validate().is_ok());

        assert_eq!(
            red_sphere().with_reflection(1.5).validate(),
            Err(SurfaceError::CoefficientOutOfRange {
                name: "reflection",
                value: 1.5
            })
        );
        assert_eq!(
            red_sphere().with_specular(0.5, 0.0).validate(),
            Err(SurfaceError::NonPositiveExponent(0.0))
        );
        assert_eq!(
            Surface::sphere(Vec3::ZERO, -1.0, Color::ONE).validate(),
            Err(SurfaceError::NonPositiveRadius(-1.0))
        );
        assert_eq!(
            Surface::plane(Vec3::ZERO, Vec3::ZERO).validate(),
            Err(SurfaceError::DegenerateNormal)
        );
        assert_eq!(
            Surface::checkerboard(Vec3::ZERO, Vec3::Y, Color::ONE, Color::ZERO, 0.0).validate(),
            Err(SurfaceError::NonPositiveTileSize(0.0))
        );
    }
}

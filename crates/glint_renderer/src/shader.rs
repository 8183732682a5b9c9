//! Whitted-style shading: nearest hit, Blinn-Phong lighting with hard
//! shadows, and mirror reflections attenuated by an energy budget.
//!
//! The reflection chain is evaluated with an explicit stack instead of
//! recursion. Each level contributes `local + reflection * deeper`, clamped
//! to [0, 1], and the chain ends once the remaining energy drops below
//! [`ENERGY_CUTOFF`] or a ray escapes the scene.

use glint_core::{Scene, Surface};
use glint_math::{reflect, Color, Interval, Ray, Vec3};

/// Rays carrying less energy than this contribute nothing.
pub const ENERGY_CUTOFF: f32 = 0.01;

/// Offset along the normal for rays leaving a surface, against self-hits.
pub const SURFACE_OFFSET: f32 = 1e-4;

/// Nearest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray
    pub distance: f32,
    /// Index of the surface in scene order
    pub index: usize,
}

/// Find the nearest surface hit by `ray`.
///
/// Uses a strict comparison, so on exactly equal distances the surface listed
/// first wins.
pub fn nearest_hit(surfaces: &[Surface], ray: &Ray) -> Option<Hit> {
    let mut nearest: Option<Hit> = None;
    for (index, surface) in surfaces.iter().enumerate() {
        if let Some(distance) = surface.intersect(ray) {
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(Hit { distance, index });
            }
        }
    }
    nearest
}

/// Counters gathered while tracing one primary ray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Surfaces hit along the reflection chain
    pub hits: usize,
    /// Reflection rays spawned, including the last one that was cut off
    pub reflection_rays: usize,
    /// Hits that failed the shadow test
    pub shadowed: usize,
}

/// Shades rays against a borrowed scene.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }

    /// Color seen along `ray` when it carries `energy` (1.0 for primary rays).
    pub fn shade(&self, ray: &Ray, energy: f32) -> Color {
        self.trace(ray, energy).0
    }

    /// Like [`Shader::shade`], also returning what the chain did.
    pub fn trace(&self, ray: &Ray, energy: f32) -> (Color, TraceStats) {
        let surfaces = self.scene.surfaces();
        let mut stats = TraceStats::default();
        // (local color, reflectivity) per level, outermost first
        let mut layers: Vec<(Color, f32)> = Vec::new();

        let mut ray = *ray;
        let mut energy = energy;
        while energy >= ENERGY_CUTOFF {
            let Some(hit) = nearest_hit(surfaces, &ray) else {
                break;
            };
            stats.hits += 1;

            let surface = &surfaces[hit.index];
            let point = ray.at(hit.distance);
            let normal = surface.normal_at(point);

            let shadowed = self.in_shadow(hit.index, point, normal);
            if shadowed {
                stats.shadowed += 1;
            }
            let local = self.local_color(surface, &ray, point, normal, shadowed);

            let reflection = surface.material.reflection;
            layers.push((local, reflection));

            ray = Ray::new(point + normal * SURFACE_OFFSET, reflect(ray.direction, normal));
            energy *= reflection;
            stats.reflection_rays += 1;
        }

        let color = layers
            .iter()
            .rev()
            .fold(Color::ZERO, |deeper, &(local, reflection)| {
                Interval::UNIT.clamp_vec3(local + reflection * deeper)
            });
        (color, stats)
    }

    /// Ambient term plus, when lit, diffuse and specular terms.
    fn local_color(
        &self,
        surface: &Surface,
        ray: &Ray,
        point: Vec3,
        normal: Vec3,
        shadowed: bool,
    ) -> Color {
        let light = &self.scene.light;
        let base = surface.color_at(point);
        let mut color = self.scene.ambient * base;
        if shadowed {
            return color;
        }

        let material = &surface.material;
        let to_light = (light.position - point).normalize();
        let to_origin = (ray.origin - point).normalize();
        let half = (to_light + to_origin).normalize_or_zero();

        color += material.diffuse * normal.dot(to_light).max(0.0) * base * light.color;
        color += material.specular_c
            * normal.dot(half).max(0.0).powf(material.specular_k)
            * light.color;
        color
    }

    /// True when any other surface sits between `point` and the light.
    fn in_shadow(&self, index: usize, point: Vec3, normal: Vec3) -> bool {
        let light = self.scene.light.position;
        let light_distance = point.distance(light);
        let shadow_ray = Ray::new(point + normal * SURFACE_OFFSET, (light - point).normalize());

        self.scene
            .surfaces()
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .any(|(_, surface)| {
                surface
                    .intersect(&shadow_ray)
                    .is_some_and(|distance| distance < light_distance)
            })
    }
}

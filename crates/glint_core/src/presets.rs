//! Built-in scenes.

use glint_math::{Color, Vec3};

use crate::scene::Scene;
use crate::surface::Surface;

/// Scenes that can be rendered without a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Four reflective spheres over a black and white checkerboard floor.
    Showcase,
    /// A single non-reflective red sphere on black, useful for determinism checks.
    RedSphere,
}

impl Preset {
    /// Build the scene for this preset.
    pub fn build(self) -> Scene {
        match self {
            Preset::Showcase => showcase(),
            Preset::RedSphere => red_sphere(),
        }
    }
}

fn showcase() -> Scene {
    Scene::new()
        .with_surface(Surface::sphere(
            Vec3::new(0.75, 0.1, 1.0),
            0.6,
            Color::new(0.8, 0.3, 0.0),
        ))
        .with_surface(Surface::sphere(
            Vec3::new(-0.3, 0.01, 0.2),
            0.3,
            Color::new(0.0, 0.0, 0.9),
        ))
        .with_surface(Surface::sphere(
            Vec3::new(-2.75, 0.1, 3.5),
            0.6,
            Color::new(0.1, 0.572, 0.184),
        ))
        .with_surface(Surface::sphere(
            Vec3::new(0.0, 1.0, 3.5),
            0.6,
            Color::new(0.580, 0.082, 0.666),
        ))
        .with_surface(Surface::checkerboard(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::Y,
            Color::ONE,
            Color::ZERO,
            0.2,
        ))
}

fn red_sphere() -> Scene {
    Scene::new().with_surface(
        Surface::sphere(Vec3::new(0.0, 0.35, 0.5), 0.6, Color::new(1.0, 0.0, 0.0))
            .with_reflection(0.0),
    )
}

//! Scene container and scene file loading.
//!
//! A scene is an ordered list of surfaces lit by a single point light plus a
//! constant ambient term. Order only matters when two surfaces are hit at
//! exactly the same distance: the earlier one wins.

use std::path::Path;

use glint_math::{Color, Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::{Surface, SurfaceError};

/// Ambient light coefficient used when a scene does not set one.
pub const DEFAULT_AMBIENT: f32 = 0.05;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid surface #{index} ({kind}): {source}")]
    InvalidSurface {
        index: usize,
        kind: &'static str,
        #[source]
        source: SurfaceError,
    },

    #[error("Ambient coefficient must lie in [0, 1], got {0}")]
    InvalidAmbient(f32),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A point light source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, -10.0),
            color: Color::ONE,
        }
    }
}

/// The renderable world: surfaces, light and ambient term.
///
/// Immutable while a frame renders; workers share it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    surfaces: Vec<Surface>,
    pub light: PointLight,
    pub ambient: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default light and ambient term.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            light: PointLight::default(),
            ambient: DEFAULT_AMBIENT,
        }
    }

    /// Set the light source.
    pub fn with_light(mut self, light: PointLight) -> Self {
        self.light = light;
        self
    }

    /// Set the ambient coefficient.
    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// Append a surface (builder form).
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Append a surface and return its index.
    pub fn add(&mut self, surface: Surface) -> usize {
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    /// Surfaces in scene order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Validate the ambient term and every surface.
    pub fn validate(&self) -> SceneResult<()> {
        if !Interval::UNIT.contains(self.ambient) {
            return Err(SceneError::InvalidAmbient(self.ambient));
        }
        for (index, surface) in self.surfaces.iter().enumerate() {
            surface
                .validate()
                .map_err(|source| SceneError::InvalidSurface {
                    index,
                    kind: surface.kind_name(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Parse and validate a scene from JSON text.
    ///
    /// ```json
    /// {
    ///   "light": { "position": [5, 5, -10], "color": [1, 1, 1] },
    ///   "ambient": 0.05,
    ///   "surfaces": [
    ///     { "type": "sphere", "position": [0.75, 0.1, 1], "radius": 0.6, "color": [0.8, 0.3, 0] },
    ///     { "type": "checkerboard", "position": [0, -0.5, 0], "normal": [0, 1, 0],
    ///       "color1": [1, 1, 1], "color2": [0, 0, 0], "tile_size": 0.2, "reflection": 0.3 }
    ///   ]
    /// }
    /// ```
    ///
    /// `light` and `ambient` are optional. Material coefficients
    /// (`reflection`, `diffuse`, `specular_c`, `specular_k`) are optional on
    /// every surface and fall back to the defaults for its type.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let file: SceneFile = serde_json::from_str(json)?;
        let scene = Scene::from(file);
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene file from disk.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        log::info!("Loaded {} surfaces from {:?}", scene.len(), path);
        Ok(scene)
    }
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default)]
    light: PointLight,
    #[serde(default = "default_ambient")]
    ambient: f32,
    surfaces: Vec<SurfaceDesc>,
}

fn default_ambient() -> f32 {
    DEFAULT_AMBIENT
}

fn white() -> Color {
    Color::ONE
}

#[derive(Deserialize)]
struct SurfaceDesc {
    #[serde(flatten)]
    shape: ShapeDesc,
    reflection: Option<f32>,
    diffuse: Option<f32>,
    specular_c: Option<f32>,
    specular_k: Option<f32>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ShapeDesc {
    Sphere {
        position: Vec3,
        radius: f32,
        color: Color,
    },
    Plane {
        position: Vec3,
        normal: Vec3,
        #[serde(default = "white")]
        color: Color,
    },
    Checkerboard {
        position: Vec3,
        normal: Vec3,
        color1: Color,
        color2: Color,
        tile_size: f32,
    },
}

impl From<SurfaceDesc> for Surface {
    fn from(desc: SurfaceDesc) -> Surface {
        let mut surface = match desc.shape {
            ShapeDesc::Sphere {
                position,
                radius,
                color,
            } => Surface::sphere(position, radius, color),
            ShapeDesc::Plane {
                position,
                normal,
                color,
            } => Surface::plane_with_color(position, normal, color),
            ShapeDesc::Checkerboard {
                position,
                normal,
                color1,
                color2,
                tile_size,
            } => Surface::checkerboard(position, normal, color1, color2, tile_size),
        };

        let material = &mut surface.material;
        if let Some(reflection) = desc.reflection {
            material.reflection = reflection;
        }
        if let Some(diffuse) = desc.diffuse {
            material.diffuse = diffuse;
        }
        if let Some(specular_c) = desc.specular_c {
            material.specular_c = specular_c;
        }
        if let Some(specular_k) = desc.specular_k {
            material.specular_k = specular_k;
        }
        surface
    }
}

impl From<SceneFile> for Scene {
    fn from(file: SceneFile) -> Scene {
        Scene {
            surfaces: file.surfaces.into_iter().map(Surface::from).collect(),
            light: file.light,
            ambient: file.ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceKind;

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.ambient, DEFAULT_AMBIENT);
        assert_eq!(scene.light.position, Vec3::new(5.0, 5.0, -10.0));

        let first = scene.add(Surface::sphere(Vec3::ZERO, 1.0, Color::ONE));
        let second = scene.add(Surface::plane(Vec3::ZERO, Vec3::Y));
        assert_eq!((first, second), (0, 1));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.surfaces()[1].kind_name(), "plane");
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "surfaces": [
                { "type": "sphere", "position": [0, 0, 3], "radius": 0.5, "color": [1, 0, 0] },
                { "type": "plane", "position": [0, -1, 0], "normal": [0, 2, 0] }
            ]
        }"#;

        let scene = Scene::from_json_str(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.light, PointLight::default());
        assert_eq!(scene.ambient, DEFAULT_AMBIENT);

        let sphere = &scene.surfaces()[0];
        assert_eq!(sphere.kind, SurfaceKind::Sphere { radius: 0.5 });
        assert_eq!(sphere.material.reflection, 0.85);

        let plane = &scene.surfaces()[1];
        assert_eq!(plane.kind, SurfaceKind::Plane { normal: Vec3::Y });
        assert_eq!(plane.material.color, Color::ONE);
    }

    #[test]
    fn test_from_json_overrides() {
        let json = r#"{
            "light": { "position": [0, 10, 0], "color": [0.5, 0.5, 0.5] },
            "ambient": 0.1,
            "surfaces": [
                { "type": "checkerboard", "position": [0, -0.5, 0], "normal": [0, 1, 0],
                  "color1": [1, 1, 1], "color2": [0, 0, 0], "tile_size": 0.2,
                  "reflection": 0.4, "specular_k": 10 }
            ]
        }"#;

        let scene = Scene::from_json_str(json).unwrap();
        assert_eq!(scene.ambient, 0.1);
        assert_eq!(scene.light.position, Vec3::new(0.0, 10.0, 0.0));

        let board = &scene.surfaces()[0];
        assert_eq!(board.material.reflection, 0.4);
        assert_eq!(board.material.specular_k, 10.0);
        assert_eq!(board.material.diffuse, 0.75);
        assert!(matches!(
            board.kind,
            SurfaceKind::Checkerboard { tile_size, .. } if (tile_size - 0.2).abs() < 1e-6
        ));
    }

    #[test]
    fn test_from_json_rejects_invalid_surface() {
        let json = r#"{
            "surfaces": [
                { "type": "plane", "position": [0, 0, 0], "normal": [0, 1, 0] },
                { "type": "sphere", "position": [0, 0, 3], "radius": 0.5,
                  "color": [1, 0, 0], "diffuse": 2.0 }
            ]
        }"#;

        match Scene::from_json_str(json) {
            Err(SceneError::InvalidSurface { index, kind, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, "sphere");
            }
            other => panic!("expected InvalidSurface, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let json = r#"{ "surfaces": [ { "type": "torus", "position": [0, 0, 0] } ] }"#;
        assert!(matches!(Scene::from_json_str(json), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_validate_ambient() {
        let scene = Scene::new().with_ambient(1.5);
        assert!(matches!(scene.validate(), Err(SceneError::InvalidAmbient(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("glint_missing_scene_file.json");
        assert!(matches!(Scene::load(&path), Err(SceneError::Io(_))));
    }
}

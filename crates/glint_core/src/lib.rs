//! Glint Core - Scene model for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Surfaces**: `Surface` with a shared `Material` and a `SurfaceKind`
//!   (sphere, plane, checkerboard plane)
//! - **Scenes**: `Scene`, an ordered surface list plus `PointLight` and ambient term
//! - **Scene files**: JSON loading via serde
//! - **Presets**: built-in scenes for the CLI and tests
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Scene, Surface, Color, Vec3};
//!
//! let scene = Scene::new()
//!     .with_surface(Surface::sphere(Vec3::new(0.0, 0.0, 3.0), 0.5, Color::new(1.0, 0.0, 0.0)));
//! scene.validate()?;
//! ```

pub mod presets;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use glint_math::{Color, Ray, Vec3};
pub use presets::Preset;
pub use scene::{PointLight, Scene, SceneError, SceneResult, DEFAULT_AMBIENT};
pub use surface::{Material, Surface, SurfaceError, SurfaceKind};

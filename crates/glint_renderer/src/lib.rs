//! Glint renderer - CPU Whitted ray tracing
//!
//! One primary ray per pixel, Blinn-Phong shading with hard shadows and
//! mirror reflections, rendered on a pool of worker threads.

mod camera;
mod error;
mod orbit;
mod renderer;
mod scheduler;
mod shader;

pub use camera::{Camera, Viewport, DEFAULT_EYE};
pub use error::{RenderError, RenderResult};
pub use orbit::{render_orbit, OrbitReport, OrbitSettings};
pub use renderer::{color_to_rgb, render, render_frame, ImageBuffer, RenderConfig, RenderStats};
pub use scheduler::{static_partition, RowQueue, Schedule, WorkerStats};
pub use shader::{nearest_hit, Hit, Shader, TraceStats, ENERGY_CUTOFF, SURFACE_OFFSET};

/// Re-export common math types from glint_math
pub use glint_math::{Color, Ray, Vec3};

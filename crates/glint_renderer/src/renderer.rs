//! Frame rendering entry points.
//!
//! Implements the per-frame pipeline:
//! - Resolve the camera against the image size
//! - Shade one primary ray per pixel on the configured worker pool
//! - Convert the float buffer to 8-bit RGB and write it to disk

use std::path::Path;
use std::time::{Duration, Instant};

use glint_core::Scene;
use glint_math::{Color, Interval};

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::scheduler::{self, Schedule, WorkerStats};
use crate::shader::Shader;

/// Energy carried by a primary ray.
const PRIMARY_ENERGY: f32 = 1.0;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Number of worker threads
    pub threads: usize,
    /// How rows are distributed over the workers
    pub schedule: Schedule,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            threads: 1,
            schedule: Schedule::default(),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set row distribution policy.
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Reject zero-sized images and empty worker pools.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidThreadCount);
        }
        Ok(())
    }
}

/// Convert a color to 8-bit RGB, rounding to nearest.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to8 = |c: f32| (Interval::UNIT.clamp(c) * 255.0).round() as u8;
    [to8(color.x), to8(color.y), to8(color.z)]
}

/// Float RGB image buffer, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to 8-bit RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Convert to an `image` RGB image.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y)))
        })
    }

    /// Write the image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.to_rgb8().save(path)?;
        Ok(())
    }
}

/// Timing of one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    pub schedule: Schedule,
    pub workers: Vec<WorkerStats>,
    pub elapsed: Duration,
}

impl RenderStats {
    /// Report per-worker and total timings.
    pub fn log(&self) {
        for worker in &self.workers {
            log::info!(
                "Thread {} execution time: {} ms ({} rows)",
                worker.worker,
                worker.elapsed.as_millis(),
                worker.rows
            );
        }
        log::info!(
            "Frame rendered in {} ms ({} schedule, {} threads)",
            self.elapsed.as_millis(),
            self.schedule.name(),
            self.workers.len()
        );
    }
}

/// Render the scene into a new image buffer.
pub fn render_frame(
    config: &RenderConfig,
    scene: &Scene,
    camera: &Camera,
) -> RenderResult<(ImageBuffer, RenderStats)> {
    config.validate()?;
    let viewport = camera.viewport(config.width, config.height)?;
    let shader = Shader::new(scene);

    let mut image = ImageBuffer::new(config.width, config.height);
    let start = Instant::now();

    let workers = scheduler::run(
        config.schedule,
        config.threads,
        config.width as usize,
        &mut image.pixels,
        |image_row, row| {
            // Image rows run top-down, viewport rows bottom-up.
            let j = viewport.image_row(image_row as u32);
            for (i, pixel) in row.iter_mut().enumerate() {
                let ray = viewport.primary_ray(i as u32, j);
                *pixel = shader.shade(&ray, PRIMARY_ENERGY);
            }
        },
    )?;

    let stats = RenderStats {
        schedule: config.schedule,
        workers,
        elapsed: start.elapsed(),
    };
    Ok((image, stats))
}

/// Render the scene and write it to `path`.
pub fn render(
    config: &RenderConfig,
    scene: &Scene,
    camera: &Camera,
    path: impl AsRef<Path>,
) -> RenderResult<RenderStats> {
    let path = path.as_ref();
    log::info!(
        "Rendering {}x{} with {} surfaces to {:?}",
        config.width,
        config.height,
        scene.len(),
        path
    );

    let (image, stats) = render_frame(config, scene, camera)?;
    stats.log();
    image.save(path)?;
    Ok(stats)
}

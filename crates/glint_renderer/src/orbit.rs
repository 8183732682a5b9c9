//! Orbit sequences: one frame per camera step around a target.

use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use glint_core::Scene;
use glint_math::Vec3;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::renderer::{render_frame, RenderConfig};

/// Orbit sequence settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Frames per full revolution
    pub frames: u32,
    /// Playback rate, reported alongside the frames
    pub fps: u32,
    pub target: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            frames: 60,
            fps: 30,
            target: Vec3::ZERO,
            radius: 1.0,
            height: 0.35,
        }
    }
}

impl OrbitSettings {
    /// Set frame count.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Set playback rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Camera angle of `frame`, in radians.
    pub fn angle(&self, frame: u32) -> f32 {
        frame as f32 * TAU / self.frames.max(1) as f32
    }

    /// Camera for `frame`.
    pub fn camera(&self, frame: u32) -> Camera {
        Camera::orbit(self.target, self.radius, self.height).with_angle(self.angle(frame))
    }

    /// Output path of `frame` inside `dir`.
    pub fn frame_path(dir: &Path, frame: u32) -> PathBuf {
        dir.join(format!("frame_{:03}.png", frame))
    }
}

/// Outcome of an orbit render.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitReport {
    pub written: Vec<PathBuf>,
    /// Frames that failed to render or save
    pub failed: Vec<u32>,
    pub elapsed: Duration,
}

impl OrbitReport {
    /// Check whether every frame was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render a full revolution into `dir` as numbered PNG frames.
///
/// A frame that fails is logged and skipped; the remaining frames are still
/// rendered.
pub fn render_orbit(
    config: &RenderConfig,
    scene: &Scene,
    settings: &OrbitSettings,
    dir: impl AsRef<Path>,
) -> RenderResult<OrbitReport> {
    if settings.frames == 0 {
        return Err(RenderError::InvalidFrameCount);
    }
    config.validate()?;

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    log::info!(
        "Rendering {} orbit frames at {}x{} into {:?}",
        settings.frames,
        config.width,
        config.height,
        dir
    );

    let start = Instant::now();
    let mut report = OrbitReport {
        written: Vec::with_capacity(settings.frames as usize),
        failed: Vec::new(),
        elapsed: Duration::ZERO,
    };

    for frame in 0..settings.frames {
        let path = OrbitSettings::frame_path(dir, frame);
        let result = render_frame(config, scene, &settings.camera(frame))
            .and_then(|(image, stats)| image.save(&path).map(|()| stats));

        match result {
            Ok(stats) => {
                log::debug!("Frame {} done in {} ms", frame, stats.elapsed.as_millis());
                report.written.push(path);
            }
            Err(e) => {
                log::error!("Frame {} failed: {}", frame, e);
                report.failed.push(frame);
            }
        }
    }

    report.elapsed = start.elapsed();
    log::info!(
        "Wrote {}/{} frames in {:.2}s ({} fps playback)",
        report.written.len(),
        settings.frames,
        report.elapsed.as_secs_f32(),
        settings.fps
    );
    Ok(report)
}

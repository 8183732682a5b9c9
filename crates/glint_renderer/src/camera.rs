//! Camera and primary ray generation.
//!
//! The image plane bounds are aspect-corrected and shifted up by a quarter
//! unit: `(-1, -1/r + 0.25)` to `(1, 1/r + 0.25)` with `r = width / height`.
//! Pixel rows are counted from the bottom; the renderer flips them into
//! top-down image rows.

use glint_math::{Ray, Vec3, Vec4};

use crate::error::{RenderError, RenderResult};

/// Default eye position of the fixed camera.
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.35, -1.0);

/// How primary rays leave the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// Eye looking down +Z through an image plane at z = 0.
    Fixed { eye: Vec3 },
    /// Eye circling `target` in the XZ plane at `height` above it.
    Orbit {
        target: Vec3,
        radius: f32,
        height: f32,
        angle: f32,
    },
}

impl Default for Camera {
    fn default() -> Self {
        Self::fixed(DEFAULT_EYE)
    }
}

impl Camera {
    /// Create a fixed camera at `eye`.
    pub fn fixed(eye: Vec3) -> Self {
        Camera::Fixed { eye }
    }

    /// Create an orbiting camera at angle 0.
    pub fn orbit(target: Vec3, radius: f32, height: f32) -> Self {
        Camera::Orbit {
            target,
            radius,
            height,
            angle: 0.0,
        }
    }

    /// Move an orbiting camera to `theta` radians around its target.
    ///
    /// Has no effect on a fixed camera.
    pub fn set_angle(&mut self, theta: f32) {
        if let Camera::Orbit { angle, .. } = self {
            *angle = theta;
        }
    }

    /// Builder form of [`Camera::set_angle`].
    pub fn with_angle(mut self, theta: f32) -> Self {
        self.set_angle(theta);
        self
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        match *self {
            Camera::Fixed { eye } => eye,
            Camera::Orbit {
                target,
                radius,
                height,
                angle,
            } => target + Vec3::new(radius * angle.cos(), height, radius * angle.sin()),
        }
    }

    /// Precompute everything needed to generate rays for a `width` x `height` image.
    pub fn viewport(&self, width: u32, height: u32) -> RenderResult<Viewport> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let ratio = width as f32 / height as f32;
        let bounds = Vec4::new(-1.0, -1.0 / ratio + 0.25, 1.0, 1.0 / ratio + 0.25);
        let eye = self.position();

        let projection = match *self {
            Camera::Fixed { .. } => Projection::Plane {
                step_x: span_step(bounds.x, bounds.z, width),
                step_y: span_step(bounds.y, bounds.w, height),
            },
            Camera::Orbit { target, .. } => {
                let forward = (target - eye)
                    .try_normalize()
                    .ok_or(RenderError::DegenerateCamera("eye coincides with target"))?;
                let right = forward
                    .cross(Vec3::Y)
                    .try_normalize()
                    .ok_or(RenderError::DegenerateCamera("view direction is vertical"))?;
                let up = right.cross(forward).normalize();
                Projection::Basis { forward, right, up }
            }
        };

        Ok(Viewport {
            width,
            height,
            eye,
            bounds,
            projection,
        })
    }
}

/// Distance between neighbouring pixel centers across `[lo, hi]`.
///
/// A single pixel sits on the low edge.
fn span_step(lo: f32, hi: f32, pixels: u32) -> f32 {
    if pixels > 1 {
        (hi - lo) / (pixels - 1) as f32
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Projection {
    Plane { step_x: f32, step_y: f32 },
    Basis { forward: Vec3, right: Vec3, up: Vec3 },
}

/// A camera resolved against an image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    eye: Vec3,
    /// (x_min, y_min, x_max, y_max) of the image plane
    bounds: Vec4,
    projection: Projection,
}

impl Viewport {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Primary ray through column `i` and bottom-up row `j`.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        let direction = match self.projection {
            Projection::Plane { step_x, step_y } => {
                let q = Vec3::new(
                    self.bounds.x + i as f32 * step_x,
                    self.bounds.y + j as f32 * step_y,
                    0.0,
                );
                q - self.eye
            }
            Projection::Basis { forward, right, up } => {
                let u = (i as f32 / self.width as f32) * 2.0 - 1.0;
                let v = (j as f32 / self.height as f32) * 2.0 - 1.0;
                forward + u * right * self.bounds.z + v * up * self.bounds.w
            }
        };
        Ray::new(self.eye, direction.normalize())
    }

    /// Image row (top-down) that bottom-up row `j` is stored in.
    pub fn image_row(&self, j: u32) -> u32 {
        self.height - j - 1
    }
}

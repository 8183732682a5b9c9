//! Errors produced while rendering and writing frames.

use thiserror::Error;

/// Errors that can occur during a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Thread count must be at least 1")]
    InvalidThreadCount,

    #[error("Orbit render needs at least one frame")]
    InvalidFrameCount,

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("Render worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

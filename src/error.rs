//! Error types shared across the crate.

use thiserror::Error;

/// Failures while building the renderer and initial scene.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("no suitable GPU adapter found: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("failed to create rendering surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Failures while rendering a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("could not acquire surface texture: {0}")]
    SurfaceAcquire(#[from] wgpu::SurfaceError),

    #[error("composer is disposed")]
    Disposed,
}

/// Failures while resizing the render target.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("resize to zero-area target {width}x{height}")]
    ZeroArea { width: u32, height: u32 },

    #[error("composer is disposed")]
    Disposed,
}

//! Startup failures, one variant per subsystem

use thiserror::Error;

/// Errors raised while bringing up the GPU renderer
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Fatal errors before the main loop starts
#[derive(Error, Debug)]
pub enum StartupError {
    /// The event loop could not connect to the display server
    #[error("could not initialize display subsystem: {0}")]
    Display(#[from] winit::error::EventLoopError),

    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("could not create renderer: {0}")]
    Renderer(#[from] RendererError),
}

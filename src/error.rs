use thiserror::Error;

/// Startup failures. Nothing in the frame loop returns these; gameplay
/// preconditions are reported as plain `bool`s.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid level data: {0}")]
    LevelData(#[from] serde_json::Error),

    #[error("no level numbered {0}")]
    UnknownLevel(u8),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::font::FontError;

/// Why a pixel buffer could not be allocated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("allocation failure: {width}x{height} RGBA does not fit in memory")]
    Overflow { width: u32, height: u32 },
    #[error("allocation failure")]
    OutOfMemory { bytes: usize },
}

/// Failure while creating or presenting a display context
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("could not create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("could not create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("could not create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("{width}x{height} exceeds the GPU's {max}x{max} texture limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("surface does not support this adapter")]
    UnsupportedSurface,

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("could not set font: {0}")]
    Font(#[from] FontError),

    #[error("could not acquire frame: {0}")]
    Present(#[from] wgpu::SurfaceError),
}

pub type Result<T> = std::result::Result<T, SurfaceError>;

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

/// Surface dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when neither side exceeds `max`
    pub fn fits_within(&self, max: u32) -> bool {
        self.width <= max && self.height <= max
    }

    /// Shrink each side to at most `max`
    pub fn clamped(&self, max: u32) -> Self {
        Self::new(self.width.min(max), self.height.min(max))
    }

    /// Total number of pixels, `None` if it does not fit in `usize`
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Total size in bytes for an RGBA buffer
    pub fn buffer_len(&self) -> Option<usize> {
        self.pixel_count()?.checked_mul(4)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Open a window whose inner area is exactly `size` physical pixels
pub fn open_window(
    event_loop: &ActiveEventLoop,
    title: &str,
    size: SurfaceSize,
) -> Result<Arc<Window>, winit::error::OsError> {
    let attributes = Window::default_attributes()
        .with_title(title)
        .with_inner_size(winit::dpi::PhysicalSize::new(size.width, size.height));

    event_loop.create_window(attributes).map(Arc::new)
}

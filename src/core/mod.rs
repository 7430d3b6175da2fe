pub mod display_context;
pub mod frame_limiter;
pub mod gpu_context;
pub mod pixel;
pub mod pixel_buffer;
pub mod sprite;
pub mod surface_renderer;
pub mod window;

pub use display_context::{DisplayContext, FRAMERATE_LIMIT};
pub use frame_limiter::FrameLimiter;
pub use gpu_context::GpuContext;
pub use pixel::{ParsePixelError, Pixel};
pub use pixel_buffer::PixelBuffer;
pub use sprite::Sprite;
pub use surface_renderer::SurfaceRenderer;
pub use window::{open_window, SurfaceSize};

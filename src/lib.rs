pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod font;
pub mod text;

pub use crate::core::{DisplayContext, Pixel, PixelBuffer, SurfaceSize, FRAMERATE_LIMIT};
pub use config::SurfaceConfig;
pub use error::{AllocationError, Result, SurfaceError};
pub use font::{FontError, FontResolver, LoadedFont};
pub use text::{TextLabel, TextStyle};

use std::sync::Arc;

use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::error::{Result, SurfaceError};
use crate::font::{FontResolver, FontSource, LoadedFont};
use crate::text::{TextLabel, TextOverlay, TextStyle};

use super::frame_limiter::FrameLimiter;
use super::pixel_buffer::PixelBuffer;
use super::surface_renderer::SurfaceRenderer;
use super::window::{open_window, SurfaceSize};

/// Redraw cap applied to every display context
pub const FRAMERATE_LIMIT: u32 = 60;

/// Everything needed to show one pixel buffer with a text label in a window
///
/// Built in one go by [`DisplayContext::create`]; there is no partially
/// initialized state. Fields drop in declaration order, so the pixel buffer
/// goes first and the window last.
pub struct DisplayContext {
    pixels: PixelBuffer,
    label: TextLabel,
    font: LoadedFont,
    overlay: TextOverlay,
    renderer: SurfaceRenderer,
    limiter: FrameLimiter,
    window: Arc<Window>,
}

/// CPU-side part of a display context
pub(crate) struct Contents {
    pub pixels: PixelBuffer,
    pub label: TextLabel,
    pub font: LoadedFont,
}

impl Contents {
    /// Allocate the pixel buffer, style the label, resolve and bind the font
    pub fn prepare<S: FontSource>(
        size: SurfaceSize,
        style: &TextStyle,
        resolver: &FontResolver<S>,
    ) -> Result<Self> {
        let pixels = PixelBuffer::new(size.width, size.height).inspect_err(|_| {
            eprintln!("ERROR: Could not create GUI: allocation failure");
        })?;

        let mut label = TextLabel::new();
        label.apply_style(style);

        let font = resolver.resolve(&style.font_name)?;
        label.set_font(&font);

        Ok(Self {
            pixels,
            label,
            font,
        })
    }
}

impl DisplayContext {
    /// Open a window with a `width` x `height` pixel buffer, using the
    /// system's installed fonts for the label
    pub fn create(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
        style: &TextStyle,
    ) -> Result<Self> {
        Self::create_with(event_loop, title, width, height, style, &FontResolver::system())
    }

    /// Like [`DisplayContext::create`] with a caller-provided font source
    pub fn create_with<S: FontSource>(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
        style: &TextStyle,
        resolver: &FontResolver<S>,
    ) -> Result<Self> {
        let size = SurfaceSize::new(width, height);
        if size.is_empty() {
            return Err(SurfaceError::EmptySurface { width, height });
        }

        let window = open_window(event_loop, title, size)?;
        let limiter = FrameLimiter::new(FRAMERATE_LIMIT);
        let renderer = SurfaceRenderer::new(window.clone(), size)?;
        let overlay = TextOverlay::new(&window, renderer.gpu().device(), renderer.format());

        let Contents {
            pixels,
            label,
            font,
        } = Contents::prepare(size, style, resolver)?;
        overlay.bind_font(&font);

        log::info!(
            "Created {}x{} display {:?} with font {}",
            width,
            height,
            title,
            font.family()
        );

        Ok(Self {
            pixels,
            label,
            font,
            overlay,
            renderer,
            limiter,
            window,
        })
    }

    /// Release the pixel buffer and every other handle
    pub fn destroy(self) {
        let Self { pixels, window, .. } = self;
        log::debug!("Releasing {} byte pixel buffer", pixels.len());
        drop(pixels);
        drop(window);
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub fn label(&self) -> &TextLabel {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut TextLabel {
        &mut self.label
    }

    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    pub fn frame_limiter(&self) -> &FrameLimiter {
        &self.limiter
    }

    pub fn frame_limiter_mut(&mut self) -> &mut FrameLimiter {
        &mut self.limiter
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Forward a window event; returns true when the overlay consumed it
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::Resized(size) = event {
            self.resize((*size).into());
        }
        self.overlay.handle_event(&self.window, event)
    }

    /// Reconfigure the surface for a new window size
    ///
    /// The pixel buffer keeps its dimensions and is stretched to fit.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.renderer.resize(size);
    }

    /// Upload the pixel buffer, draw it and the label, and present
    pub fn present(&mut self) -> Result<()> {
        let Self {
            pixels,
            label,
            overlay,
            renderer,
            window,
            ..
        } = self;

        renderer.present(pixels, |gpu, encoder, view, target| {
            overlay.paint(window, gpu, encoder, view, target, label);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pixel;
    use crate::font::FontError;

    fn style(font_name: &str) -> TextStyle {
        TextStyle {
            font_name: font_name.to_string(),
            color: Pixel::WHITE,
            font_size: 16,
        }
    }

    /// First installed face that lives in a file, if the host has any
    fn installed_family() -> Option<String> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let family = db
            .faces()
            .find(|face| matches!(face.source, fontdb::Source::File(_)))
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
        family
    }

    #[test]
    fn test_unknown_font_fails_without_panicking() {
        let resolver = FontResolver::new(fontdb::Database::new());
        let result = Contents::prepare(SurfaceSize::new(80, 60), &style("DejaVu Sans"), &resolver);

        assert!(matches!(
            result,
            Err(SurfaceError::Font(FontError::NoMatch(_)))
        ));
    }

    #[test]
    fn test_bad_font_spec_fails() {
        let resolver = FontResolver::new(fontdb::Database::new());
        let result = Contents::prepare(
            SurfaceSize::new(8, 8),
            &style("Inter:weight=much"),
            &resolver,
        );

        assert!(matches!(
            result,
            Err(SurfaceError::Font(FontError::InvalidPattern(_)))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure_is_reported_before_font_lookup() {
        let resolver = FontResolver::new(fontdb::Database::new());
        let result = Contents::prepare(
            SurfaceSize::new(u32::MAX, u32::MAX),
            &style("DejaVu Sans"),
            &resolver,
        );

        assert!(matches!(result, Err(SurfaceError::Allocation(_))));
    }

    #[test]
    fn test_prepare_with_installed_font() {
        let Some(family) = installed_family() else {
            eprintln!("no file-backed system fonts, skipping");
            return;
        };

        let contents = Contents::prepare(
            SurfaceSize::new(800, 600),
            &style(&family),
            &FontResolver::system(),
        )
        .unwrap();

        assert_eq!(contents.pixels.width(), 800);
        assert_eq!(contents.pixels.height(), 600);
        assert_eq!(contents.pixels.len(), 800 * 600 * 4);
        assert!(contents.pixels.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(contents.label.character_size(), 16);
        assert_eq!(contents.label.fill_color(), Pixel::WHITE);
        assert!(contents.label.has_font());
        assert!(!contents.font.data().is_empty());
    }
}

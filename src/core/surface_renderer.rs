use std::sync::Arc;

use wgpu::{CommandEncoder, Surface, SurfaceConfiguration, TextureView};
use winit::window::Window;

use crate::error::Result;

use super::gpu_context::GpuContext;
use super::pixel_buffer::PixelBuffer;
use super::sprite::Sprite;
use super::window::SurfaceSize;

/// Presents a pixel buffer on a window surface through a sprite
pub struct SurfaceRenderer {
    sprite: Sprite,
    surface_config: SurfaceConfiguration,
    surface: Surface<'static>,
    gpu: GpuContext,
}

impl SurfaceRenderer {
    /// Set up the surface for `window` and a sprite of `sprite_size`
    pub fn new(window: Arc<Window>, sprite_size: SurfaceSize) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let window_size = SurfaceSize::from(window.inner_size());
        let surface = instance.create_surface(window)?;

        let gpu = pollster::block_on(GpuContext::new_with_surface(&instance, &surface))?;
        gpu.check_texture_size(sprite_size)?;

        let surface_size = if window_size.is_empty() {
            sprite_size
        } else {
            window_size.clamped(gpu.max_texture_dimension())
        };
        let surface_config = gpu.surface_config(&surface, surface_size)?;
        surface.configure(gpu.device(), &surface_config);

        let sprite = Sprite::new(gpu.device(), sprite_size, surface_config.format);

        Ok(Self {
            sprite,
            surface_config,
            surface,
            gpu,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Current surface dimensions
    pub fn dimensions(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface_config.width, self.surface_config.height)
    }

    /// Reconfigure the surface; the sprite keeps its size
    pub fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        let size = size.clamped(self.gpu.max_texture_dimension());
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    /// Upload `pixels`, draw the sprite, let `overlay` draw on top, present
    pub fn present<F>(&mut self, pixels: &PixelBuffer, overlay: F) -> Result<()>
    where
        F: FnOnce(&GpuContext, &mut CommandEncoder, &TextureView, SurfaceSize),
    {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {:?}, reconfiguring", e);
                self.surface.configure(self.gpu.device(), &self.surface_config);
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sprite.upload(self.gpu.queue(), pixels);

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Surface Render Encoder"),
            });

        self.sprite.draw(&mut encoder, &view);
        overlay(&self.gpu, &mut encoder, &view, self.dimensions());

        self.gpu.queue().submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

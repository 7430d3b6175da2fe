use wgpu::{Adapter, Device, DeviceDescriptor, Instance, Queue, Surface};

use crate::error::{Result, SurfaceError};

use super::window::SurfaceSize;

/// Adapter, device and queue chosen for one window surface
pub struct GpuContext {
    adapter: Adapter,
    device: Device,
    queue: Queue,
}

impl GpuContext {
    /// Create a GPU context compatible with the provided surface
    pub async fn new_with_surface(instance: &Instance, surface: &Surface<'_>) -> Result<Self> {
        let adapter = Self::request_adapter(instance, surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        log::info!("Using GPU adapter: {}", adapter.get_info().name);
        Ok(Self {
            adapter,
            device,
            queue,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Largest width or height the device accepts for a 2D texture
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Reject sizes the device cannot hold in one texture
    pub fn check_texture_size(&self, size: SurfaceSize) -> Result<()> {
        ensure_fits(size, self.max_texture_dimension())
    }

    /// Surface configuration for `size`, preferring an sRGB format
    pub fn surface_config(
        &self,
        surface: &Surface<'_>,
        size: SurfaceSize,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(SurfaceError::UnsupportedSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await?;
        Ok(adapter)
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        let pair = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Pixel Surface Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await?;
        Ok(pair)
    }
}

fn ensure_fits(size: SurfaceSize, max: u32) -> Result<()> {
    if size.fits_within(max) {
        Ok(())
    } else {
        Err(SurfaceError::TooLarge {
            width: size.width,
            height: size.height,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size_within_limit() {
        assert!(ensure_fits(SurfaceSize::new(800, 600), 2048).is_ok());
        assert!(ensure_fits(SurfaceSize::new(2048, 2048), 2048).is_ok());
    }

    #[test]
    fn test_texture_size_over_limit_is_an_error() {
        let err = ensure_fits(SurfaceSize::new(20000, 10), 8192).unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::TooLarge {
                width: 20000,
                height: 10,
                max: 8192
            }
        ));
    }

    #[test]
    fn test_gpu_context_is_send() {
        // Creation needs real GPU hardware; this only checks the type
        fn assert_send<T: Send>() {}
        assert_send::<GpuContext>();
    }
}

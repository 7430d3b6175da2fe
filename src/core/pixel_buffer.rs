use crate::error::AllocationError;

use super::pixel::Pixel;
use super::window::SurfaceSize;

/// CPU-side RGBA image mirroring the displayed texture
///
/// The byte length is fixed at `width * height * 4` when the buffer is
/// allocated and never changes afterwards. The buffer is uniquely owned and
/// deliberately not `Clone`.
#[derive(Debug)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
    size: SurfaceSize,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer, reporting allocator refusal as an error
    pub fn new(width: u32, height: u32) -> Result<Self, AllocationError> {
        let size = SurfaceSize::new(width, height);
        let len = size
            .buffer_len()
            .ok_or(AllocationError::Overflow { width, height })?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| AllocationError::OutOfMemory { bytes: len })?;
        bytes.resize(len, 0);

        Ok(Self { bytes, size })
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Bytes per row, as uploaded to the texture; `None` past `u32`
    pub fn stride(&self) -> Option<u32> {
        self.size.width.checked_mul(4)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn pixels(&self) -> &[Pixel] {
        bytemuck::cast_slice(&self.bytes)
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        bytemuck::cast_slice_mut(&mut self.bytes)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels()[i])
    }

    /// Write one pixel; returns false when (x, y) is outside the buffer
    pub fn put(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels_mut()[i] = pixel;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels_mut().fill(pixel);
    }
}

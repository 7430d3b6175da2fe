use pixel_surface::{AllocationError, Pixel, PixelBuffer, SurfaceSize};

#[cfg(test)]
mod allocation_tests {
    use super::*;

    #[test]
    fn test_buffer_matches_dimensions_and_is_zeroed() {
        let sizes = [(1, 1), (800, 600), (1024, 768), (1920, 1080), (7, 13)];

        for (width, height) in sizes {
            let buffer = PixelBuffer::new(width, height).unwrap();
            assert_eq!(buffer.len(), (width * height * 4) as usize);
            assert_eq!(buffer.size(), SurfaceSize::new(width, height));
            assert!(
                buffer.as_bytes().iter().all(|&b| b == 0),
                "{}x{} buffer should start zeroed",
                width,
                height
            );
        }
    }

    #[test]
    fn test_zero_sized_buffers_do_not_panic() {
        let buffer = PixelBuffer::new(0, 600).unwrap();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.pixels().is_empty());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_forced_allocation_failure() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, AllocationError::Overflow { .. }));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocator_refusal_is_reported() {
        // Fits in usize but exceeds isize::MAX, which Vec refuses up front
        let err = PixelBuffer::new(u32::MAX, 1 << 30).unwrap_err();
        assert!(matches!(err, AllocationError::OutOfMemory { .. }));
    }
}

#[cfg(test)]
mod access_tests {
    use super::*;

    #[test]
    fn test_writes_land_in_rgba_order() {
        let mut buffer = PixelBuffer::new(3, 2).unwrap();
        buffer.put(1, 1, Pixel::rgba(10, 20, 30, 40));

        let offset = (3 + 1) * 4;
        assert_eq!(&buffer.as_bytes()[offset..offset + 4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_byte_and_pixel_views_agree() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        buffer.as_bytes_mut()[8..12].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(buffer.get(2, 0), Some(Pixel::rgba(1, 2, 3, 4)));
        assert_eq!(buffer.pixels()[2], Pixel::rgba(1, 2, 3, 4));
    }

    #[test]
    fn test_out_of_bounds_reads_and_writes() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        assert_eq!(buffer.get(4, 0), None);
        assert_eq!(buffer.get(0, 4), None);
        assert!(!buffer.put(100, 100, Pixel::WHITE));
        assert_eq!(buffer.len(), 64);
    }

    #[test]
    fn test_length_is_stable_across_writes() {
        let mut buffer = PixelBuffer::new(32, 16).unwrap();
        let len = buffer.len();

        buffer.fill(Pixel::BLUE);
        for x in 0..32 {
            buffer.put(x, x % 16, Pixel::YELLOW);
        }
        for p in buffer.pixels_mut() {
            p.alpha = 128;
        }

        assert_eq!(buffer.len(), len);
        assert!(buffer.pixels().iter().all(|p| p.alpha == 128));
    }
}

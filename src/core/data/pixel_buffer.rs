use crate::core::data::colour::{Colour, channel_to_u8};
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 4;

fn resolution_to_buffer_size(resolution: Resolution) -> usize {
    resolution.size() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        x: u32,
        y: u32,
        resolution: Resolution,
    },
    BoundsMismatch {
        resolution_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                resolution_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "resolution size {} does not match buffer size {}",
                    resolution_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { x, y, resolution } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} raster",
                    x,
                    y,
                    resolution.width(),
                    resolution.height()
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// A single RGBA8 pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA8 raster.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    resolution: Resolution,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// A fully transparent raster.
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            buffer: vec![0; resolution_to_buffer_size(resolution)],
        }
    }

    pub fn from_data(
        resolution: Resolution,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = resolution_to_buffer_size(resolution);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                resolution_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { resolution, buffer })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<(), PixelBufferError> {
        let Some(offset) = self.resolution.offset(x, y) else {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                resolution: self.resolution,
            });
        };

        let index = offset * BYTES_PER_PIXEL;
        self.buffer[index..index + BYTES_PER_PIXEL]
            .copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);

        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<Rgba, PixelBufferError> {
        let Some(offset) = self.resolution.offset(x, y) else {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                resolution: self.resolution,
            });
        };

        let index = offset * BYTES_PER_PIXEL;
        Ok(Rgba {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
            a: self.buffer[index + 3],
        })
    }

    /// Alpha-blends every pixel over a solid background, yielding packed RGB8.
    #[must_use]
    pub fn composite_over(&self, background: Colour) -> Vec<u8> {
        let background = [
            f64::from(channel_to_u8(background.r)),
            f64::from(channel_to_u8(background.g)),
            f64::from(channel_to_u8(background.b)),
        ];

        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| {
                let alpha = f64::from(px[3]) / 255.0;
                let blend = |channel: u8, bg: f64| {
                    (f64::from(channel) * alpha + bg * (1.0 - alpha))
                        .round()
                        .clamp(0.0, 255.0) as u8
                };
                [
                    blend(px[0], background[0]),
                    blend(px[1], background[1]),
                    blend(px[2], background[2]),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_resolution(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    #[test]
    fn test_new_creates_transparent_buffer() {
        let resolution = create_resolution(10, 10);
        let buffer = PixelBuffer::new(resolution);

        assert_eq!(buffer.resolution(), resolution);
        assert_eq!(buffer.buffer_size(), 400); // 10 * 10 * 4
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_valid() {
        let resolution = create_resolution(2, 1);
        let data: Vec<u8> = vec![
            255, 0, 0, 255, // (0,0) opaque red
            0, 255, 0, 128, // (1,0) half-transparent green
        ];

        let buffer = PixelBuffer::from_data(resolution, data.clone()).unwrap();

        assert_eq!(buffer.buffer(), &data);
    }

    #[test]
    fn test_from_data_buffer_wrong_size() {
        let resolution = create_resolution(2, 2);

        let result = PixelBuffer::from_data(resolution, vec![0; 12]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                resolution_size: 16,
                buffer_size: 12
            }
        );
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut buffer = PixelBuffer::new(create_resolution(3, 3));
        let red = Rgba {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };

        buffer.set_pixel(1, 1, red).unwrap();

        assert_eq!(&buffer.buffer()[16..20], &[255, 0, 0, 255]);
        assert_eq!(buffer.pixel(1, 1).unwrap(), red);
        assert_eq!(buffer.pixel(0, 0).unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let resolution = create_resolution(3, 3);
        let mut buffer = PixelBuffer::new(resolution);

        let result = buffer.set_pixel(3, 1, Rgba::TRANSPARENT);

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                x: 3,
                y: 1,
                resolution
            })
        );
    }

    #[test]
    fn test_composite_transparent_pixels_show_background() {
        let buffer = PixelBuffer::new(create_resolution(2, 1));

        assert_eq!(buffer.composite_over(Colour::WHITE), vec![255; 6]);
        assert_eq!(buffer.composite_over(Colour::BLACK), vec![0; 6]);
    }

    #[test]
    fn test_composite_opaque_pixels_hide_background() {
        let data = vec![10, 20, 30, 255, 0, 0, 0, 0];
        let buffer = PixelBuffer::from_data(create_resolution(2, 1), data).unwrap();

        assert_eq!(
            buffer.composite_over(Colour::WHITE),
            vec![10, 20, 30, 255, 255, 255]
        );
    }

    #[test]
    fn test_composite_blends_partial_alpha() {
        let data = vec![255, 255, 255, 51];
        let buffer = PixelBuffer::from_data(create_resolution(1, 1), data).unwrap();

        // 255 * 0.2 over black
        assert_eq!(buffer.composite_over(Colour::BLACK), vec![51, 51, 51]);
    }
}

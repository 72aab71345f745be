use crate::core::data::accumulation_buffers::AccumulationBuffers;
use crate::core::data::colour::channel_to_u8;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// Log-density scale shared by every pixel of one render pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ToneScale {
    max_hits: u64,
    log_max: f64,
}

impl ToneScale {
    /// `None` when nothing has been plotted yet.
    pub(crate) fn for_buffers(buffers: &AccumulationBuffers) -> Option<Self> {
        let max_hits = buffers.max_hits();

        if max_hits == 0 {
            return None;
        }

        Some(Self {
            max_hits,
            log_max: (max_hits as f64).ln(),
        })
    }

    fn alpha(&self, hits: u64) -> u8 {
        // ln(1) == 0, so a buffer whose busiest pixel has one hit would divide by zero.
        let ratio = if hits >= self.max_hits {
            1.0
        } else {
            (hits as f64).ln() / self.log_max
        };

        channel_to_u8(ratio)
    }
}

/// Shades row `y` of `buffers` into `out`, which holds exactly one row of RGBA bytes.
///
/// Unhit pixels are written as transparent black.
pub(crate) fn shade_row(buffers: &AccumulationBuffers, scale: ToneScale, y: u32, out: &mut [u8]) {
    let width = buffers.resolution().width() as usize;
    let row_start = y as usize * width;

    for (x, pixel) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let offset = row_start + x;
        let hits = buffers.hit_count(offset);

        if hits == 0 {
            pixel.fill(0);
            continue;
        }

        let sum = buffers.colour_sum(offset);
        let count = hits as f64;

        pixel[0] = channel_to_u8(sum.r / count);
        pixel[1] = channel_to_u8(sum.g / count);
        pixel[2] = channel_to_u8(sum.b / count);
        pixel[3] = scale.alpha(hits);
    }
}

/// Tone-maps accumulated hits into an RGBA raster.
///
/// Each hit pixel takes the mean of its colour samples and an alpha of
/// `ln(hits) / ln(max_hits)`. An empty buffer renders fully transparent.
#[must_use]
pub fn render_density(buffers: &AccumulationBuffers) -> PixelBuffer {
    let resolution = buffers.resolution();
    let mut pixels = PixelBuffer::new(resolution);

    let Some(scale) = ToneScale::for_buffers(buffers) else {
        return pixels;
    };

    let row_bytes = resolution.width() as usize * BYTES_PER_PIXEL;

    for (y, row) in pixels.buffer_mut().chunks_exact_mut(row_bytes).enumerate() {
        shade_row(buffers, scale, y as u32, row);
    }

    pixels
}

use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::render_density::render_density::{ToneScale, shade_row};
use crate::core::data::accumulation_buffers::AccumulationBuffers;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// Row-parallel [`render_density`](super::render_density::render_density).
///
/// Output is byte-identical to the serial renderer.
#[must_use]
pub fn render_density_parallel_rayon(buffers: &AccumulationBuffers) -> PixelBuffer {
    match render_density_parallel_rayon_cancelable(buffers, &NeverCancel) {
        Ok(pixels) => pixels,
        Err(Cancelled) => {
            // NeverCancel never cancels, so this branch is unreachable
            unreachable!("NeverCancel token should never signal cancellation")
        }
    }
}

/// Like [`render_density_parallel_rayon`], checking `cancel` at the start of each row.
///
/// A cancelled render yields no pixels at all; there is no partial frame.
pub fn render_density_parallel_rayon_cancelable<C: CancelToken>(
    buffers: &AccumulationBuffers,
    cancel: &C,
) -> Result<PixelBuffer, Cancelled> {
    let resolution = buffers.resolution();
    let mut pixels = PixelBuffer::new(resolution);

    let Some(scale) = ToneScale::for_buffers(buffers) else {
        return Ok(pixels);
    };

    let row_bytes = resolution.width() as usize * BYTES_PER_PIXEL;

    pixels
        .buffer_mut()
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .try_for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }

            shade_row(buffers, scale, y as u32, row);
            Ok(())
        })?;

    Ok(pixels)
}

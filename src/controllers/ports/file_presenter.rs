use std::path::Path;

use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;

pub trait FilePresenterPort {
    /// Writes `buffer` to `filepath`, flattening transparency onto `background`.
    fn present(
        &self,
        buffer: &PixelBuffer,
        background: Colour,
        filepath: impl AsRef<Path>,
    ) -> std::io::Result<()>;
}

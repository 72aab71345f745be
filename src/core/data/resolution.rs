use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    InvalidSize { width: u32, height: u32 },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "resolution must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for ResolutionError {}

/// Pixel dimensions of the accumulation grid and the rendered raster.
///
/// The viewport is fixed to the square `[-1, 1]²`, stretched over the full
/// width and height; row 0 corresponds to `y == -1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 {
            return Err(ResolutionError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[must_use]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major offset of a pixel, or `None` if it lies outside the grid.
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y as usize * self.width as usize + x as usize)
    }

    /// Maps a point of the `[-1, 1]²` viewport to its row-major pixel offset.
    ///
    /// Non-finite coordinates and coordinates outside the closed viewport
    /// return `None`. The finiteness test comes first: a NaN would otherwise
    /// slip through the float-to-int cast as pixel 0. The upper edge `1.0`
    /// lands on the last row/column.
    #[must_use]
    pub fn point_to_offset(&self, p: Point) -> Option<usize> {
        if !p.is_finite() {
            return None;
        }

        if !(-1.0..=1.0).contains(&p.x) || !(-1.0..=1.0).contains(&p.y) {
            return None;
        }

        let x = ((p.x + 1.0) / 2.0 * f64::from(self.width)).floor() as u32;
        let y = ((p.y + 1.0) / 2.0 * f64::from(self.height)).floor() as u32;

        self.offset(x.min(self.width - 1), y.min(self.height - 1))
    }
}

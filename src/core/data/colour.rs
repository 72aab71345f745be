/// An RGB colour with each channel in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Colour {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Linear interpolation; `bias == 0` is `self`, `bias == 1` is `other`.
    #[must_use]
    pub fn lerp(&self, other: Colour, bias: f64) -> Self {
        Self {
            r: self.r + (other.r - self.r) * bias,
            g: self.g + (other.g - self.g) * bias,
            b: self.b + (other.b - self.b) * bias,
        }
    }

    #[must_use]
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[must_use]
    pub fn is_normalised(&self) -> bool {
        self.channels()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

/// Scales a `[0, 1]` channel to a byte, clamping and rounding to nearest.
#[must_use]
pub fn channel_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }

    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

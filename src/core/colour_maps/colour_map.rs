use crate::core::colour_maps::errors::ColourMapError;
use crate::core::data::colour::Colour;

/// An ordered, non-empty gradient of colours sampled by linear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourMap {
    colours: Vec<Colour>,
}

impl ColourMap {
    pub fn new(colours: Vec<Colour>) -> Result<Self, ColourMapError> {
        if colours.is_empty() {
            return Err(ColourMapError::Empty);
        }

        if let Some((index, colour)) = colours
            .iter()
            .enumerate()
            .find(|(_, colour)| !colour.is_normalised())
        {
            return Err(ColourMapError::ChannelOutOfRange {
                index,
                channels: colour.channels(),
            });
        }

        Ok(Self { colours })
    }

    /// A map holding a single colour.
    #[must_use]
    pub fn solid(colour: Colour) -> Self {
        Self {
            colours: vec![colour],
        }
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Samples the gradient at `t`, clamped to `[0, 1]`.
    ///
    /// `t == 0` is the first colour and `t == 1` the last. When `t` lands
    /// exactly on a stop, that stop is returned unmodified, which also covers
    /// single-colour maps.
    #[must_use]
    pub fn sample(&self, t: f64) -> Colour {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = t * (self.colours.len() - 1) as f64;
        let left = idx.floor();
        let right = idx.ceil();

        if left == right {
            return self.colours[left as usize];
        }

        let bias = (idx - left) / (right - left);
        self.colours[left as usize].lerp(self.colours[right as usize], bias)
    }
}

use crate::core::data::affine::AffineTransform;
use crate::core::data::point::Point;
use crate::core::flame::variation::Variation;
use rand::Rng;

/// One map of the IFS: an affine step followed by a variation.
///
/// `colour_weight` only steers the colour recurrence of the chaos game. It
/// never biases which transform gets picked.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub affine: AffineTransform,
    pub variation: Variation,
    pub colour_weight: f64,
}

impl Transform {
    #[must_use]
    pub const fn new(affine: AffineTransform, variation: Variation, colour_weight: f64) -> Self {
        Self {
            affine,
            variation,
            colour_weight,
        }
    }

    /// Identity affine, linear variation, colour weight 0.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(AffineTransform::IDENTITY, Variation::Linear, 0.0)
    }

    /// Random variation with every coefficient uniform in `[-2, 2)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, colour_weight: f64) -> Self {
        let mut coefficient = || rng.gen_range(-2.0..2.0);
        let affine = AffineTransform::new(
            coefficient(),
            coefficient(),
            coefficient(),
            coefficient(),
            coefficient(),
            coefficient(),
        );

        Self::new(affine, Variation::random(rng), colour_weight)
    }

    pub fn apply<R: Rng + ?Sized>(&self, p: Point, rng: &mut R) -> Point {
        self.variation.apply(self.affine.apply(p), rng)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

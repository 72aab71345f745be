//! The closed set of nonlinear point maps applied after each affine step.
//!
//! Every variation is total: division by a zero radius and similar
//! degenerate inputs produce NaN or infinite coordinates rather than an
//! error. The chaos game discards such samples when it plots them.

use crate::core::data::point::Point;
use rand::Rng;
use std::error::Error;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariationError {
    pub name: String,
}

impl fmt::Display for UnknownVariationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variation '{}'", self.name)
    }
}

impl Error for UnknownVariationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variation {
    #[default]
    Linear,
    Sinusoidal,
    Spherical,
    Swirl,
    Horseshoe,
    Polar,
    Handkerchief,
    Heart,
    Disc,
    Spiral,
    Hyperbolic,
    Diamond,
    Fisheye,
    Julia,
}

impl Variation {
    pub const ALL: &'static [Self] = &[
        Self::Linear,
        Self::Sinusoidal,
        Self::Spherical,
        Self::Swirl,
        Self::Horseshoe,
        Self::Polar,
        Self::Handkerchief,
        Self::Heart,
        Self::Disc,
        Self::Spiral,
        Self::Hyperbolic,
        Self::Diamond,
        Self::Fisheye,
        Self::Julia,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sinusoidal => "sinusoidal",
            Self::Spherical => "spherical",
            Self::Swirl => "swirl",
            Self::Horseshoe => "horseshoe",
            Self::Polar => "polar",
            Self::Handkerchief => "handkerchief",
            Self::Heart => "heart",
            Self::Disc => "disc",
            Self::Spiral => "spiral",
            Self::Hyperbolic => "hyperbolic",
            Self::Diamond => "diamond",
            Self::Fisheye => "fisheye",
            Self::Julia => "julia",
        }
    }

    /// Picks a variation uniformly from [`Variation::ALL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Only `Julia` draws from `rng`, exactly one random bit per call.
    pub fn apply<R: Rng + ?Sized>(self, p: Point, rng: &mut R) -> Point {
        let Point { x, y } = p;

        match self {
            Self::Linear => p,
            Self::Sinusoidal => Point::new(x.sin(), y.sin()),
            Self::Spherical => p.scale(1.0 / p.length_squared()),
            Self::Swirl => {
                let sin_r2 = p.length_squared().sin();
                Point::new(x * sin_r2 - y * sin_r2, x * sin_r2 + y * sin_r2)
            }
            Self::Horseshoe => {
                let r = p.length();
                Point::new((x - y) * (x + y) / r, 2.0 * x * y / r)
            }
            Self::Polar => Point::new(p.angle() / PI, p.length() - 1.0),
            Self::Handkerchief => {
                let (theta, r) = (p.angle(), p.length());
                Point::new((theta + r).sin(), (theta - r).cos())
            }
            Self::Heart => {
                let (theta, r) = (p.angle(), p.length());
                Point::new((theta * r).sin(), -(theta * r).cos()).scale(r)
            }
            Self::Disc => {
                let (theta, r) = (p.angle(), p.length());
                Point::new((PI * r).sin(), (PI * r).cos()).scale(theta / r)
            }
            Self::Spiral => {
                let (theta, r) = (p.angle(), p.length());
                Point::new(theta.cos() + r.sin(), theta.sin() - r.cos()).scale(1.0 / r)
            }
            Self::Hyperbolic => {
                let (theta, r) = (p.angle(), p.length());
                Point::new(theta.sin() / r, r * theta.cos())
            }
            Self::Diamond => {
                let (theta, r) = (p.angle(), p.length());
                Point::new(theta.sin() * r.cos(), theta.cos() * r.sin())
            }
            Self::Fisheye => p.scale(2.0 / (p.length() + 1.0)),
            Self::Julia => {
                let sqrt_r = p.length().sqrt();
                let omega = if rng.gen_bool(0.5) { PI } else { 0.0 };
                let arg = p.angle() / 2.0 + omega;
                Point::new(sqrt_r * arg.cos(), sqrt_r * arg.sin())
            }
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variation {
    type Err = UnknownVariationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownVariationError {
                name: s.to_string(),
            })
    }
}

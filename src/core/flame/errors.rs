use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum FlameDefinitionError {
    NoTransforms,
    TransformIndexOutOfRange { index: usize, len: usize },
    ColourWeightOutOfRange { weight: f64 },
    CannotRemoveLastTransform,
}

impl fmt::Display for FlameDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransforms => write!(f, "a flame needs at least one transform"),
            Self::TransformIndexOutOfRange { index, len } => {
                write!(f, "transform index {} out of range for {} transforms", index, len)
            }
            Self::ColourWeightOutOfRange { weight } => {
                write!(f, "colour weight {} is outside [0, 1]", weight)
            }
            Self::CannotRemoveLastTransform => {
                write!(f, "cannot remove the only remaining transform")
            }
        }
    }
}

impl Error for FlameDefinitionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosGameParamsError {
    ZeroOrbits,
    ZeroPlottedSteps,
}

impl fmt::Display for ChaosGameParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroOrbits => write!(f, "orbits per pass must be greater than zero"),
            Self::ZeroPlottedSteps => write!(f, "plotted steps must be greater than zero"),
        }
    }
}

impl Error for ChaosGameParamsError {}

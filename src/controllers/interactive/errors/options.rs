use crate::core::data::colour::Colour;
use crate::core::data::resolution::ResolutionError;
use crate::core::flame::errors::ChaosGameParamsError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FlameOptionsError {
    Params(ChaosGameParamsError),
    Resolution(ResolutionError),
    BackgroundOutOfRange { background: Colour },
}

impl fmt::Display for FlameOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(err) => write!(f, "invalid sample counts: {}", err),
            Self::Resolution(err) => write!(f, "invalid resolution: {}", err),
            Self::BackgroundOutOfRange { background } => write!(
                f,
                "background ({}, {}, {}) has a channel outside [0, 1]",
                background.r, background.g, background.b
            ),
        }
    }
}

impl Error for FlameOptionsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Params(err) => Some(err),
            Self::Resolution(err) => Some(err),
            Self::BackgroundOutOfRange { .. } => None,
        }
    }
}

impl From<ChaosGameParamsError> for FlameOptionsError {
    fn from(err: ChaosGameParamsError) -> Self {
        Self::Params(err)
    }
}

impl From<ResolutionError> for FlameOptionsError {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}

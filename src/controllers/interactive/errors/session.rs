use crate::controllers::interactive::errors::options::FlameOptionsError;
use crate::core::data::resolution::ResolutionError;
use crate::core::flame::errors::{ChaosGameParamsError, FlameDefinitionError};
use std::error::Error;
use std::fmt;

/// A rejected edit. The session is left exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Options(FlameOptionsError),
    Definition(FlameDefinitionError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(err) => write!(f, "rejected options: {}", err),
            Self::Definition(err) => write!(f, "rejected flame edit: {}", err),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Options(err) => Some(err),
            Self::Definition(err) => Some(err),
        }
    }
}

impl From<FlameOptionsError> for SessionError {
    fn from(err: FlameOptionsError) -> Self {
        Self::Options(err)
    }
}

impl From<FlameDefinitionError> for SessionError {
    fn from(err: FlameDefinitionError) -> Self {
        Self::Definition(err)
    }
}

impl From<ChaosGameParamsError> for SessionError {
    fn from(err: ChaosGameParamsError) -> Self {
        Self::Options(err.into())
    }
}

impl From<ResolutionError> for SessionError {
    fn from(err: ResolutionError) -> Self {
        Self::Options(err.into())
    }
}

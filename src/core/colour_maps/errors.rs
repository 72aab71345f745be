use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum ColourMapError {
    Empty,
    ChannelOutOfRange { index: usize, channels: [f64; 3] },
}

impl fmt::Display for ColourMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "colour map must contain at least one colour"),
            Self::ChannelOutOfRange { index, channels } => {
                write!(
                    f,
                    "colour {} has channels {:?} outside [0, 1]",
                    index, channels
                )
            }
        }
    }
}

impl Error for ColourMapError {}

#[derive(Debug, Clone, PartialEq)]
pub enum CmapParseError {
    WrongChannelCount { line: usize, found: usize },
    InvalidChannel { line: usize, value: String },
    ColourMap(ColourMapError),
}

impl fmt::Display for CmapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongChannelCount { line, found } => {
                write!(f, "line {}: expected 3 channels, found {}", line, found)
            }
            Self::InvalidChannel { line, value } => {
                write!(f, "line {}: '{}' is not a channel value in 0..=255", line, value)
            }
            Self::ColourMap(err) => write!(f, "{}", err),
        }
    }
}

impl Error for CmapParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ColourMap(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ColourMapError> for CmapParseError {
    fn from(err: ColourMapError) -> Self {
        Self::ColourMap(err)
    }
}

/// Failure to resolve a colour map by name through a [`ColourMapSource`].
///
/// [`ColourMapSource`]: crate::core::colour_maps::source::ColourMapSource
#[derive(Debug)]
pub enum ColourMapLoadError {
    UnknownName(String),
    Io { name: String, source: std::io::Error },
    Parse { name: String, source: CmapParseError },
}

impl fmt::Display for ColourMapLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName(name) => write!(f, "no colour map named '{}'", name),
            Self::Io { name, source } => {
                write!(f, "failed to read colour map '{}': {}", name, source)
            }
            Self::Parse { name, source } => {
                write!(f, "failed to parse colour map '{}': {}", name, source)
            }
        }
    }
}

impl Error for ColourMapLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownName(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

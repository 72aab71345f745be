use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::colour_maps::errors::ColourMapLoadError;
use crate::core::colour_maps::factory::colour_map_factory;
use crate::core::colour_maps::kinds::ColourMapKind;

/// Resolves a colour map from a resource name.
///
/// Implementations may block (file or network reads); callers that must not
/// stall run them off the tick thread.
pub trait ColourMapSource: Send + Sync {
    fn load(&self, name: &str) -> Result<ColourMap, ColourMapLoadError>;
}

/// Serves the palettes compiled into the crate, looked up by display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinColourMapSource;

impl ColourMapSource for BuiltinColourMapSource {
    fn load(&self, name: &str) -> Result<ColourMap, ColourMapLoadError> {
        ColourMapKind::from_name(name)
            .map(colour_map_factory)
            .ok_or_else(|| ColourMapLoadError::UnknownName(name.to_string()))
    }
}

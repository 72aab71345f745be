use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::data::affine::AffineTransform;
use crate::core::data::colour::Colour;
use crate::core::flame::transform::Transform;
use crate::core::flame::variation::Variation;
use std::sync::Arc;

/// One change requested by the configuration surface.
///
/// Every accepted edit starts a new buffer generation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEdit {
    SetOrbits(u32),
    SetWarmupSteps(u32),
    SetPlottedSteps(u32),
    SetResolution { width: u32, height: u32 },
    SetTickInterval { millis: u64 },
    SetBackground(Colour),
    SetAffine { index: usize, affine: AffineTransform },
    SetVariation { index: usize, variation: Variation },
    SetColourWeight { index: usize, weight: f64 },
    /// Appends an identity transform.
    AddTransform,
    RemoveTransform { index: usize },
    /// Puts the transform back to identity, linear, colour weight 0.
    ResetTransform { index: usize },
    SetFinalTransform(Transform),
    ResetFinalTransform,
    ReplaceColourMap(Arc<ColourMap>),
}

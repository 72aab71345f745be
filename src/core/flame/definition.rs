use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::flame::errors::FlameDefinitionError;
use crate::core::flame::transform::Transform;
use rand::Rng;
use std::sync::Arc;

fn check_colour_weight(weight: f64) -> Result<(), FlameDefinitionError> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(FlameDefinitionError::ColourWeightOutOfRange { weight });
    }

    Ok(())
}

/// The IFS being rendered: the transforms the chaos game walks, the final
/// transform used only to place plotted samples, and the palette.
///
/// Always holds at least one transform, and every transform's colour weight
/// lies in `[0, 1]`. The final transform's colour weight is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct FlameDefinition {
    transforms: Vec<Transform>,
    final_transform: Transform,
    colour_map: Arc<ColourMap>,
}

impl FlameDefinition {
    pub fn new(
        transforms: Vec<Transform>,
        final_transform: Transform,
        colour_map: Arc<ColourMap>,
    ) -> Result<Self, FlameDefinitionError> {
        if transforms.is_empty() {
            return Err(FlameDefinitionError::NoTransforms);
        }

        for transform in &transforms {
            check_colour_weight(transform.colour_weight)?;
        }

        Ok(Self {
            transforms,
            final_transform,
            colour_map,
        })
    }

    /// Three random transforms with colour weights 0, 0.5 and 1, and an
    /// identity final transform.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, colour_map: Arc<ColourMap>) -> Self {
        let transforms = [0.0, 0.5, 1.0]
            .into_iter()
            .map(|weight| Transform::random(rng, weight))
            .collect();

        Self {
            transforms,
            final_transform: Transform::identity(),
            colour_map,
        }
    }

    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn transform(&self, index: usize) -> Result<&Transform, FlameDefinitionError> {
        self.transforms
            .get(index)
            .ok_or(FlameDefinitionError::TransformIndexOutOfRange {
                index,
                len: self.transforms.len(),
            })
    }

    #[must_use]
    pub fn final_transform(&self) -> &Transform {
        &self.final_transform
    }

    #[must_use]
    pub fn colour_map(&self) -> &Arc<ColourMap> {
        &self.colour_map
    }

    pub fn set_transform(
        &mut self,
        index: usize,
        transform: Transform,
    ) -> Result<(), FlameDefinitionError> {
        check_colour_weight(transform.colour_weight)?;

        let len = self.transforms.len();
        let slot = self
            .transforms
            .get_mut(index)
            .ok_or(FlameDefinitionError::TransformIndexOutOfRange { index, len })?;
        *slot = transform;

        Ok(())
    }

    pub fn add_transform(&mut self, transform: Transform) -> Result<(), FlameDefinitionError> {
        check_colour_weight(transform.colour_weight)?;
        self.transforms.push(transform);
        Ok(())
    }

    pub fn remove_transform(&mut self, index: usize) -> Result<Transform, FlameDefinitionError> {
        if index >= self.transforms.len() {
            return Err(FlameDefinitionError::TransformIndexOutOfRange {
                index,
                len: self.transforms.len(),
            });
        }

        if self.transforms.len() == 1 {
            return Err(FlameDefinitionError::CannotRemoveLastTransform);
        }

        Ok(self.transforms.remove(index))
    }

    pub fn set_final_transform(&mut self, transform: Transform) {
        self.final_transform = transform;
    }

    pub fn set_colour_map(&mut self, colour_map: Arc<ColourMap>) {
        self.colour_map = colour_map;
    }
}

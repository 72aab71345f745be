use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::options::FlameOptions;
use crate::controllers::interactive::data::session_edit::SessionEdit;
use crate::controllers::interactive::errors::options::FlameOptionsError;
use crate::controllers::interactive::errors::session::SessionError;
use crate::core::actions::accumulate_samples::accumulate_samples::accumulate_samples;
use crate::core::actions::accumulate_samples::accumulate_samples_parallel_rayon::accumulate_samples_parallel_rayon;
use crate::core::actions::render_density::render_density_parallel_rayon::render_density_parallel_rayon;
use crate::core::data::accumulation_buffers::{AccumulationBuffers, AccumulationBuffersError};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;
use crate::core::flame::definition::FlameDefinition;
use crate::core::flame::params::ChaosGameParams;
use crate::core::flame::transform::Transform;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;

/// Everything a pass needs, copied out so the pass can run without the session.
#[derive(Debug, Clone)]
pub struct PassJob {
    pub generation: u64,
    pub definition: FlameDefinition,
    pub params: ChaosGameParams,
    pub resolution: Resolution,
    /// Seed for the pass's own rng, drawn from the session rng.
    pub seed: u64,
}

/// Owns the flame, its options, and the buffers rendered from them.
///
/// The session is the only place buffers are allocated or cleared. Each clear
/// starts a new generation; work tagged with an older generation is refused.
#[derive(Debug)]
pub struct Session {
    definition: FlameDefinition,
    options: FlameOptions,
    params: ChaosGameParams,
    buffers: AccumulationBuffers,
    pixels: PixelBuffer,
    generation: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(
        definition: FlameDefinition,
        options: FlameOptions,
        rng: StdRng,
    ) -> Result<Self, SessionError> {
        options.validate()?;

        let params = options.chaos_game_params()?;
        let resolution = options.resolution()?;

        info!(
            "session created: {}x{}, {} transforms",
            resolution.width(),
            resolution.height(),
            definition.transforms().len()
        );

        Ok(Self {
            definition,
            options,
            params,
            buffers: AccumulationBuffers::new(resolution),
            pixels: PixelBuffer::new(resolution),
            generation: 1,
            rng,
        })
    }

    pub fn with_seed(
        definition: FlameDefinition,
        options: FlameOptions,
        seed: u64,
    ) -> Result<Self, SessionError> {
        Self::new(definition, options, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn definition(&self) -> &FlameDefinition {
        &self.definition
    }

    #[must_use]
    pub fn options(&self) -> &FlameOptions {
        &self.options
    }

    #[must_use]
    pub fn params(&self) -> ChaosGameParams {
        self.params
    }

    #[must_use]
    pub fn buffers(&self) -> &AccumulationBuffers {
        &self.buffers
    }

    /// The most recently rendered frame.
    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Zeroes both grids and the raster and starts a new generation.
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.pixels = PixelBuffer::new(self.buffers.resolution());
        self.generation += 1;

        debug!("session reset, generation {}", self.generation);
    }

    /// One accumulate pass on the calling thread followed by one render.
    pub fn tick(&mut self) -> FrameData {
        let start = Instant::now();
        let stats = accumulate_samples(
            &self.definition,
            &mut self.buffers,
            &self.params,
            &mut self.rng,
        );
        self.render();
        let render_duration = start.elapsed();

        debug!(
            "generation {}: plotted {}, discarded {} in {:?}",
            self.generation, stats.plotted, stats.discarded, render_duration
        );

        FrameData {
            generation: self.generation,
            pixel_buffer: self.pixels.clone(),
            render_duration,
            stats,
        }
    }

    /// Like [`Session::tick`], spreading the pass over the rayon pool.
    pub fn tick_parallel(&mut self) -> Result<FrameData, AccumulationBuffersError> {
        let start = Instant::now();
        let stats = accumulate_samples_parallel_rayon(
            &self.definition,
            &mut self.buffers,
            &self.params,
            &mut self.rng,
        )?;
        self.render();
        let render_duration = start.elapsed();

        debug!(
            "generation {}: plotted {}, discarded {} in {:?}",
            self.generation, stats.plotted, stats.discarded, render_duration
        );

        Ok(FrameData {
            generation: self.generation,
            pixel_buffer: self.pixels.clone(),
            render_duration,
            stats,
        })
    }

    /// Snapshots what an off-thread pass needs.
    pub fn begin_pass(&mut self) -> PassJob {
        PassJob {
            generation: self.generation,
            definition: self.definition.clone(),
            params: self.params,
            resolution: self.buffers.resolution(),
            seed: self.rng.next_u64(),
        }
    }

    /// Merges a finished pass. Returns `Ok(false)` and leaves the buffers alone
    /// when `generation` is no longer current.
    pub fn commit_pass(
        &mut self,
        generation: u64,
        partial: &AccumulationBuffers,
    ) -> Result<bool, AccumulationBuffersError> {
        if generation != self.generation {
            trace!(
                "dropping pass for generation {} (current {})",
                generation, self.generation
            );
            return Ok(false);
        }

        self.buffers.merge(partial)?;
        Ok(true)
    }

    /// Re-renders the raster from the current buffers.
    pub fn render(&mut self) -> &PixelBuffer {
        self.pixels = render_density_parallel_rayon(&self.buffers);
        &self.pixels
    }

    /// Validates and applies `edit`, then resets.
    ///
    /// A rejected edit changes nothing, including the generation.
    pub fn apply(&mut self, edit: SessionEdit) -> Result<(), SessionError> {
        match edit {
            SessionEdit::SetOrbits(orbits) => {
                self.params = ChaosGameParams::new(
                    orbits,
                    self.params.warmup_steps(),
                    self.params.plotted_steps(),
                )?;
                self.options.orbits_per_pass = orbits;
            }
            SessionEdit::SetWarmupSteps(steps) => {
                self.params = ChaosGameParams::new(
                    self.params.orbits(),
                    steps,
                    self.params.plotted_steps(),
                )?;
                self.options.warmup_steps = steps;
            }
            SessionEdit::SetPlottedSteps(steps) => {
                self.params = ChaosGameParams::new(
                    self.params.orbits(),
                    self.params.warmup_steps(),
                    steps,
                )?;
                self.options.plotted_steps = steps;
            }
            SessionEdit::SetResolution { width, height } => {
                let resolution = Resolution::new(width, height)?;
                self.options.width = width;
                self.options.height = height;
                self.buffers = AccumulationBuffers::new(resolution);
            }
            SessionEdit::SetTickInterval { millis } => {
                self.options.tick_interval_ms = millis;
            }
            SessionEdit::SetBackground(background) => {
                if !background.is_normalised() {
                    return Err(FlameOptionsError::BackgroundOutOfRange { background }.into());
                }
                self.options.background = background;
            }
            SessionEdit::SetAffine { index, affine } => {
                let mut transform = *self.definition.transform(index)?;
                transform.affine = affine;
                self.definition.set_transform(index, transform)?;
            }
            SessionEdit::SetVariation { index, variation } => {
                let mut transform = *self.definition.transform(index)?;
                transform.variation = variation;
                self.definition.set_transform(index, transform)?;
            }
            SessionEdit::SetColourWeight { index, weight } => {
                let mut transform = *self.definition.transform(index)?;
                transform.colour_weight = weight;
                self.definition.set_transform(index, transform)?;
            }
            SessionEdit::AddTransform => {
                self.definition.add_transform(Transform::identity())?;
            }
            SessionEdit::RemoveTransform { index } => {
                self.definition.remove_transform(index)?;
            }
            SessionEdit::ResetTransform { index } => {
                self.definition.set_transform(index, Transform::identity())?;
            }
            SessionEdit::SetFinalTransform(transform) => {
                self.definition.set_final_transform(transform);
            }
            SessionEdit::ResetFinalTransform => {
                self.definition.set_final_transform(Transform::identity());
            }
            SessionEdit::ReplaceColourMap(colour_map) => {
                self.definition.set_colour_map(colour_map);
            }
        }

        self.reset();
        Ok(())
    }
}

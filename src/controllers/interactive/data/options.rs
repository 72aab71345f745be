use crate::controllers::interactive::errors::options::FlameOptionsError;
use crate::core::data::colour::Colour;
use crate::core::data::resolution::Resolution;
use crate::core::flame::params::ChaosGameParams;
use std::time::Duration;

/// User-facing render settings.
///
/// Plain values; nothing here is trusted until [`FlameOptions::validate`]
/// (or one of the typed accessors) has accepted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameOptions {
    pub orbits_per_pass: u32,
    pub warmup_steps: u32,
    pub plotted_steps: u32,
    pub width: u32,
    pub height: u32,
    /// Delay between ticks. Zero ticks back-to-back.
    pub tick_interval_ms: u64,
    /// Colour that transparent pixels are composited over for output.
    pub background: Colour,
}

impl FlameOptions {
    pub const DEFAULT_ORBITS_PER_PASS: u32 = 1000;
    pub const DEFAULT_WARMUP_STEPS: u32 = 20;
    pub const DEFAULT_PLOTTED_STEPS: u32 = 150;
    pub const DEFAULT_WIDTH: u32 = 1000;
    pub const DEFAULT_HEIGHT: u32 = 1000;
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 20;

    pub fn chaos_game_params(&self) -> Result<ChaosGameParams, FlameOptionsError> {
        Ok(ChaosGameParams::new(
            self.orbits_per_pass,
            self.warmup_steps,
            self.plotted_steps,
        )?)
    }

    pub fn resolution(&self) -> Result<Resolution, FlameOptionsError> {
        Ok(Resolution::new(self.width, self.height)?)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), FlameOptionsError> {
        self.chaos_game_params()?;
        self.resolution()?;

        if !self.background.is_normalised() {
            return Err(FlameOptionsError::BackgroundOutOfRange {
                background: self.background,
            });
        }

        Ok(())
    }
}

impl Default for FlameOptions {
    fn default() -> Self {
        Self {
            orbits_per_pass: Self::DEFAULT_ORBITS_PER_PASS,
            warmup_steps: Self::DEFAULT_WARMUP_STEPS,
            plotted_steps: Self::DEFAULT_PLOTTED_STEPS,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            background: Colour::BLACK,
        }
    }
}

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::controllers::interactive::data::options::FlameOptions;
use crate::controllers::interactive::session::Session;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::accumulate_samples::accumulate_samples::AccumulateStats;
use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::flame::definition::FlameDefinition;

/// Renders one random flame headlessly and hands it to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    options: FlameOptions,
    colour_map: Arc<ColourMap>,
    seed: u64,
    passes: u32,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P, options: FlameOptions, colour_map: ColourMap) -> Self {
        Self {
            presenter,
            options,
            colour_map: Arc::new(colour_map),
            seed: 0,
            passes: 1,
            buffer: None,
        }
    }

    /// Seeds both the random flame and the chaos game.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of accumulate passes before rendering.
    #[must_use]
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    pub fn generate(&mut self) -> Result<AccumulateStats, Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let definition = FlameDefinition::random(&mut rng, Arc::clone(&self.colour_map));
        let mut session = Session::new(definition, self.options, rng)?;

        info!("Rendering fractal flame...");
        info!("Image size: {}x{}", self.options.width, self.options.height);
        info!(
            "Passes: {} x {} orbits x {} plotted steps",
            self.passes, self.options.orbits_per_pass, self.options.plotted_steps
        );

        let start = Instant::now();
        let mut stats = AccumulateStats::default();
        for _ in 0..self.passes {
            stats += session.tick_parallel()?.stats;
        }
        let duration = start.elapsed();

        info!("Duration:   {:?}", duration);
        info!("Plotted {}, discarded {}", stats.plotted, stats.discarded);

        self.buffer = Some(session.render().clone());

        Ok(stats)
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(buffer) = &self.buffer {
            self.presenter
                .present(buffer, self.options.background, filepath)?
        }

        Ok(())
    }
}

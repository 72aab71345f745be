use env_logger::Env;
use fractal_flame::core::colour_maps::source::{BuiltinColourMapSource, ColourMapSource};
use fractal_flame::{CliRenderController, FileColourMapSource, FlameOptions, PpmFilePresenter};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_OUTPUT: &str = "output/flame.ppm";

/// Everything the binary reads from its arguments and environment.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    output: PathBuf,
    seed: u64,
    passes: u32,
    colour_map: String,
    cmap_dir: Option<PathBuf>,
}

impl Settings {
    fn from_env() -> Result<Self, Box<dyn Error>> {
        let lookup = |key: &str| std::env::var(key).ok();
        Self::from_parts(std::env::args().nth(1), lookup)
    }

    fn from_parts(
        output: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            output: PathBuf::from(output.unwrap_or_else(|| DEFAULT_OUTPUT.to_string())),
            seed: parse_var(&lookup, "FLAME_SEED")?.unwrap_or_else(rand::random),
            passes: parse_var(&lookup, "FLAME_PASSES")?.unwrap_or(1),
            colour_map: lookup("FLAME_COLOUR_MAP").unwrap_or_else(|| "White".to_string()),
            cmap_dir: lookup("FLAME_CMAP_DIR").map(PathBuf::from),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|err| format!("{}={:?}: {}", key, value, err).into())
        })
        .transpose()
}

fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let source: Box<dyn ColourMapSource> = match &settings.cmap_dir {
        Some(dir) => Box::new(FileColourMapSource::new(dir)),
        None => Box::new(BuiltinColourMapSource),
    };
    let colour_map = source.load(&settings.colour_map)?;

    info!("Seed: {}", settings.seed);
    info!("Colour map: {}", settings.colour_map);

    let mut controller =
        CliRenderController::new(PpmFilePresenter::new(), FlameOptions::default(), colour_map)
            .with_seed(settings.seed)
            .with_passes(settings.passes);

    controller.generate()?;

    if let Some(parent) = settings.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    controller.write(&settings.output)?;
    info!("Saved to {}", settings.output.display());

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    run(&Settings::from_env()?)
}

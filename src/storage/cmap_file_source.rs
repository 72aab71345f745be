use crate::core::colour_maps::cmap::parse_cmap;
use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::colour_maps::errors::ColourMapLoadError;
use crate::core::colour_maps::source::ColourMapSource;
use log::debug;
use std::path::{Path, PathBuf};

/// Loads `<dir>/<name>.cmap` palettes from disk.
#[derive(Debug, Clone)]
pub struct FileColourMapSource {
    dir: PathBuf,
}

impl FileColourMapSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        // Names are bare file stems; anything that could leave `dir` is unknown.
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return None;
        }

        Some(self.dir.join(format!("{}.cmap", name)))
    }
}

impl ColourMapSource for FileColourMapSource {
    fn load(&self, name: &str) -> Result<ColourMap, ColourMapLoadError> {
        let path = self
            .path_for(name)
            .ok_or_else(|| ColourMapLoadError::UnknownName(name.to_string()))?;

        debug!("reading colour map from {}", path.display());

        let text = std::fs::read_to_string(&path).map_err(|source| ColourMapLoadError::Io {
            name: name.to_string(),
            source,
        })?;

        parse_cmap(&text).map_err(|source| ColourMapLoadError::Parse {
            name: name.to_string(),
            source,
        })
    }
}

use crate::core::data::colour::Colour;
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AccumulationBuffersError {
    ResolutionMismatch {
        expected: Resolution,
        actual: Resolution,
    },
}

impl fmt::Display for AccumulationBuffersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionMismatch { expected, actual } => {
                write!(
                    f,
                    "cannot merge {}x{} buffers into {}x{} buffers",
                    actual.width(),
                    actual.height(),
                    expected.width(),
                    expected.height()
                )
            }
        }
    }
}

impl Error for AccumulationBuffersError {}

/// Running Monte-Carlo estimate of the attractor's density and colour field.
///
/// Two co-indexed row-major grids: a hit count per pixel and the sum of the
/// colours sampled into that pixel (three channels per pixel). Counts only
/// ever grow between resets.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffers {
    resolution: Resolution,
    hits: Vec<u64>,
    colour_sums: Vec<f64>,
}

impl AccumulationBuffers {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            hits: vec![0; resolution.size()],
            colour_sums: vec![0.0; resolution.size() * 3],
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn hits(&self) -> &[u64] {
        &self.hits
    }

    #[must_use]
    pub fn colour_sums(&self) -> &[f64] {
        &self.colour_sums
    }

    /// Records one sample of `colour` at `offset`.
    ///
    /// # Panics
    /// If `offset` is outside the grid. Offsets come from
    /// [`Resolution::point_to_offset`] on the same resolution.
    pub fn record(&mut self, offset: usize, colour: Colour) {
        self.hits[offset] += 1;

        let base = offset * 3;
        self.colour_sums[base] += colour.r;
        self.colour_sums[base + 1] += colour.g;
        self.colour_sums[base + 2] += colour.b;
    }

    #[must_use]
    pub fn hit_count(&self, offset: usize) -> u64 {
        self.hits[offset]
    }

    #[must_use]
    pub fn colour_sum(&self, offset: usize) -> Colour {
        let base = offset * 3;
        Colour::new(
            self.colour_sums[base],
            self.colour_sums[base + 1],
            self.colour_sums[base + 2],
        )
    }

    #[must_use]
    pub fn max_hits(&self) -> u64 {
        self.hits.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn total_hits(&self) -> u64 {
        self.hits.iter().sum()
    }

    /// Zero-fills both grids in place.
    pub fn clear(&mut self) {
        self.hits.fill(0);
        self.colour_sums.fill(0.0);
    }

    /// Adds a same-sized partial buffer into this one.
    pub fn merge(&mut self, other: &AccumulationBuffers) -> Result<(), AccumulationBuffersError> {
        if self.resolution != other.resolution {
            return Err(AccumulationBuffersError::ResolutionMismatch {
                expected: self.resolution,
                actual: other.resolution,
            });
        }

        for (hit, other_hit) in self.hits.iter_mut().zip(&other.hits) {
            *hit += other_hit;
        }

        for (sum, other_sum) in self.colour_sums.iter_mut().zip(&other.colour_sums) {
            *sum += other_sum;
        }

        Ok(())
    }
}

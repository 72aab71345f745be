use crate::core::flame::errors::ChaosGameParamsError;

/// Work size of one chaos-game pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChaosGameParams {
    orbits: u32,
    warmup_steps: u32,
    plotted_steps: u32,
}

impl ChaosGameParams {
    pub fn new(
        orbits: u32,
        warmup_steps: u32,
        plotted_steps: u32,
    ) -> Result<Self, ChaosGameParamsError> {
        if orbits == 0 {
            return Err(ChaosGameParamsError::ZeroOrbits);
        }

        if plotted_steps == 0 {
            return Err(ChaosGameParamsError::ZeroPlottedSteps);
        }

        Ok(Self {
            orbits,
            warmup_steps,
            plotted_steps,
        })
    }

    /// Independent sample paths per pass.
    pub fn orbits(&self) -> u32 {
        self.orbits
    }

    /// Unplotted iterations at the start of each path.
    pub fn warmup_steps(&self) -> u32 {
        self.warmup_steps
    }

    pub fn plotted_steps(&self) -> u32 {
        self.plotted_steps
    }

    /// Upper bound on the hits one pass can record.
    pub fn max_samples(&self) -> u64 {
        u64::from(self.orbits) * u64::from(self.plotted_steps)
    }

    /// The same path shape with a different orbit count.
    pub(crate) fn with_orbits(&self, orbits: u32) -> Self {
        Self { orbits, ..*self }
    }
}

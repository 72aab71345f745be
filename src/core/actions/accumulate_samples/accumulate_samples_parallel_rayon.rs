use rayon::prelude::*;

use crate::core::actions::accumulate_samples::accumulate_samples::{
    AccumulateStats, accumulate_samples,
};
use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_ORBITS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::data::accumulation_buffers::{AccumulationBuffers, AccumulationBuffersError};
use crate::core::flame::definition::FlameDefinition;
use crate::core::flame::params::ChaosGameParams;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Error type for cancelable parallel accumulation.
///
/// Cancellation is expected control flow (the buffer generation moved on),
/// not a failure to report.
#[derive(Debug, PartialEq)]
pub enum AccumulateError {
    /// The pass was abandoned; the target buffers were not touched.
    Cancelled(Cancelled),
    /// A partial buffer could not be merged into the target.
    Buffers(AccumulationBuffersError),
}

impl std::fmt::Display for AccumulateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccumulateError::Cancelled(c) => write!(f, "{}", c),
            AccumulateError::Buffers(e) => write!(f, "buffer error: {}", e),
        }
    }
}

impl std::error::Error for AccumulateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccumulateError::Cancelled(c) => Some(c),
            AccumulateError::Buffers(e) => Some(e),
        }
    }
}

impl From<AccumulationBuffersError> for AccumulateError {
    fn from(err: AccumulationBuffersError) -> Self {
        AccumulateError::Buffers(err)
    }
}

/// Parallel [`accumulate_samples`] on rayon's work-stealing pool.
///
/// Orbits are split into fixed-size chunks, each with its own `StdRng`
/// seeded from `rng`, so hit counts depend only on the seed and not on the
/// number of worker threads. Each worker accumulates into a private partial
/// buffer; partials are merged into `buffers` after the pass.
pub fn accumulate_samples_parallel_rayon<R: Rng + ?Sized>(
    definition: &FlameDefinition,
    buffers: &mut AccumulationBuffers,
    params: &ChaosGameParams,
    rng: &mut R,
) -> Result<AccumulateStats, AccumulationBuffersError> {
    accumulate_samples_parallel_rayon_cancelable(definition, buffers, params, rng, &NeverCancel)
        .map_err(|e| match e {
            AccumulateError::Buffers(err) => err,
            AccumulateError::Cancelled(_) => {
                // NeverCancel never cancels, so this branch is unreachable
                unreachable!("NeverCancel token should never signal cancellation")
            }
        })
}

/// Like [`accumulate_samples_parallel_rayon`], polling `cancel` before each
/// chunk of [`CANCEL_CHECK_INTERVAL_ORBITS`] orbits.
///
/// On [`AccumulateError::Cancelled`] the target buffers are unchanged: the
/// merge only happens once every chunk has finished.
pub fn accumulate_samples_parallel_rayon_cancelable<R, C>(
    definition: &FlameDefinition,
    buffers: &mut AccumulationBuffers,
    params: &ChaosGameParams,
    rng: &mut R,
    cancel: &C,
) -> Result<AccumulateStats, AccumulateError>
where
    R: Rng + ?Sized,
    C: CancelToken,
{
    let resolution = buffers.resolution();
    let orbits = params.orbits() as usize;
    let chunk_count = orbits.div_ceil(CANCEL_CHECK_INTERVAL_ORBITS);
    let seeds: Vec<u64> = (0..chunk_count).map(|_| rng.next_u64()).collect();

    let empty = || (AccumulationBuffers::new(resolution), AccumulateStats::default());

    let (partial, stats) = seeds
        .into_par_iter()
        .enumerate()
        .try_fold(empty, |(mut partial, mut stats), (chunk, seed)| {
            if cancel.is_cancelled() {
                return Err(AccumulateError::Cancelled(Cancelled));
            }

            let first = chunk * CANCEL_CHECK_INTERVAL_ORBITS;
            let chunk_orbits = CANCEL_CHECK_INTERVAL_ORBITS.min(orbits - first) as u32;
            let mut chunk_rng = StdRng::seed_from_u64(seed);

            stats += accumulate_samples(
                definition,
                &mut partial,
                &params.with_orbits(chunk_orbits),
                &mut chunk_rng,
            );

            Ok((partial, stats))
        })
        .try_reduce(empty, |(mut left, left_stats), (right, right_stats)| {
            left.merge(&right)?;
            Ok((left, left_stats + right_stats))
        })?;

    if cancel.is_cancelled() {
        return Err(AccumulateError::Cancelled(Cancelled));
    }

    buffers.merge(&partial)?;

    Ok(stats)
}

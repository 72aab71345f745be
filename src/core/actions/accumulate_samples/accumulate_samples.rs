use crate::core::data::accumulation_buffers::AccumulationBuffers;
use crate::core::data::point::Point;
use crate::core::flame::definition::FlameDefinition;
use crate::core::flame::params::ChaosGameParams;
use crate::core::flame::transform::Transform;
use rand::Rng;
use std::ops::{Add, AddAssign};

/// Outcome of one chaos-game pass.
///
/// `plotted + discarded` always equals `orbits * plotted_steps`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AccumulateStats {
    /// Samples written into the buffers.
    pub plotted: u64,
    /// Samples whose display point was non-finite or outside the viewport.
    pub discarded: u64,
}

impl Add for AccumulateStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            plotted: self.plotted + other.plotted,
            discarded: self.discarded + other.discarded,
        }
    }
}

impl AddAssign for AccumulateStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Uniform over the list; colour weights play no part in the choice.
fn pick_transform<'a, R: Rng + ?Sized>(transforms: &'a [Transform], rng: &mut R) -> &'a Transform {
    &transforms[rng.gen_range(0..transforms.len())]
}

/// Traces one sample path and plots it into `buffers`.
fn trace_orbit<R: Rng + ?Sized>(
    definition: &FlameDefinition,
    buffers: &mut AccumulationBuffers,
    params: &ChaosGameParams,
    rng: &mut R,
) -> AccumulateStats {
    let transforms = definition.transforms();
    let final_transform = definition.final_transform();
    let colour_map = definition.colour_map();
    let resolution = buffers.resolution();
    let mut stats = AccumulateStats::default();

    let mut p = Point::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
    let mut c: f64 = rng.gen_range(0.0..1.0);

    for _ in 0..params.warmup_steps() {
        p = pick_transform(transforms, rng).apply(p, rng);
    }

    for _ in 0..params.plotted_steps() {
        let transform = pick_transform(transforms, rng);
        p = transform.apply(p, rng);
        c = (c + transform.colour_weight) / 2.0;

        // The final transform only places the sample; `p` carries on untouched.
        let plotted = final_transform.apply(p, rng);

        match resolution.point_to_offset(plotted) {
            Some(offset) => {
                buffers.record(offset, colour_map.sample(c));
                stats.plotted += 1;
            }
            None => stats.discarded += 1,
        }
    }

    stats
}

/// Runs `params.orbits()` independent chaos-game paths over `definition`,
/// adding every in-view sample to `buffers`.
///
/// Buffers are only ever added to, so repeated calls refine the same image.
pub fn accumulate_samples<R: Rng + ?Sized>(
    definition: &FlameDefinition,
    buffers: &mut AccumulationBuffers,
    params: &ChaosGameParams,
    rng: &mut R,
) -> AccumulateStats {
    let mut stats = AccumulateStats::default();

    for _ in 0..params.orbits() {
        stats += trace_orbit(definition, buffers, params, rng);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_maps::colour_map::ColourMap;
    use crate::core::data::affine::AffineTransform;
    use crate::core::data::colour::Colour;
    use crate::core::data::resolution::Resolution;
    use crate::core::flame::variation::Variation;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn identity_definition(colour_map: ColourMap) -> FlameDefinition {
        FlameDefinition::new(
            vec![Transform::identity()],
            Transform::identity(),
            Arc::new(colour_map),
        )
        .unwrap()
    }

    fn buffers(width: u32, height: u32) -> AccumulationBuffers {
        AccumulationBuffers::new(Resolution::new(width, height).unwrap())
    }

    fn sierpinski() -> FlameDefinition {
        let half = |tx, ty| AffineTransform::new(0.5, 0.0, 0.0, 0.5, tx, ty);
        FlameDefinition::new(
            vec![
                Transform::new(half(-0.5, -0.5), Variation::Linear, 0.0),
                Transform::new(half(0.5, -0.5), Variation::Linear, 0.5),
                Transform::new(half(0.0, 0.5), Variation::Linear, 1.0),
            ],
            Transform::identity(),
            Arc::new(ColourMap::new(vec![Colour::BLACK, Colour::WHITE]).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn identity_flame_hits_the_seed_pixel_every_step() {
        let definition = identity_definition(ColourMap::solid(Colour::WHITE));
        let mut buffers = buffers(16, 16);
        let params = ChaosGameParams::new(1, 0, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        let stats = accumulate_samples(&definition, &mut buffers, &params, &mut rng);

        assert_eq!(stats, AccumulateStats { plotted: 5, discarded: 0 });
        let hit: Vec<usize> = (0..buffers.hits().len())
            .filter(|&i| buffers.hit_count(i) > 0)
            .collect();
        assert_eq!(hit.len(), 1);
        assert_eq!(buffers.hit_count(hit[0]), 5);
        assert_eq!(buffers.colour_sum(hit[0]), Colour::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn identity_flame_plots_at_the_seeded_point() {
        let definition = identity_definition(ColourMap::solid(Colour::WHITE));
        let mut buffers = buffers(16, 16);
        let params = ChaosGameParams::new(1, 0, 1).unwrap();

        let mut seed_rng = StdRng::seed_from_u64(77);
        let seed = Point::new(seed_rng.gen_range(-1.0..1.0), seed_rng.gen_range(-1.0..1.0));
        let expected = buffers.resolution().point_to_offset(seed).unwrap();

        accumulate_samples(&definition, &mut buffers, &params, &mut StdRng::seed_from_u64(77));

        assert_eq!(buffers.hit_count(expected), 1);
    }

    #[test]
    fn total_hits_never_exceed_orbits_times_plotted_steps() {
        let definition = sierpinski();
        let mut buffers = buffers(32, 32);
        let params = ChaosGameParams::new(50, 10, 40).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let stats = accumulate_samples(&definition, &mut buffers, &params, &mut rng);

        assert!(buffers.total_hits() <= params.max_samples());
        assert_eq!(buffers.total_hits(), stats.plotted);
        assert_eq!(stats.plotted + stats.discarded, params.max_samples());
    }

    #[test]
    fn repeated_passes_only_increase_hit_counts() {
        let definition = sierpinski();
        let mut buffers = buffers(32, 32);
        let params = ChaosGameParams::new(20, 5, 30).unwrap();
        let mut rng = StdRng::seed_from_u64(10);

        accumulate_samples(&definition, &mut buffers, &params, &mut rng);
        let first = buffers.hits().to_vec();
        accumulate_samples(&definition, &mut buffers, &params, &mut rng);

        for (after, before) in buffers.hits().iter().zip(&first) {
            assert!(after >= before);
        }
        assert!(buffers.total_hits() > first.iter().sum::<u64>());
    }

    #[test]
    fn same_seed_gives_identical_buffers() {
        let definition = sierpinski();
        let params = ChaosGameParams::new(10, 5, 20).unwrap();
        let mut a = buffers(16, 16);
        let mut b = buffers(16, 16);

        accumulate_samples(&definition, &mut a, &params, &mut StdRng::seed_from_u64(3));
        accumulate_samples(&definition, &mut b, &params, &mut StdRng::seed_from_u64(3));

        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_variation_samples_are_discarded_without_aborting() {
        // Collapse every point onto the origin, then apply spherical: 0/0.
        let collapse = AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let definition = FlameDefinition::new(
            vec![Transform::new(collapse, Variation::Spherical, 0.5)],
            Transform::identity(),
            Arc::new(ColourMap::solid(Colour::WHITE)),
        )
        .unwrap();
        let mut buffers = buffers(8, 8);
        let params = ChaosGameParams::new(4, 2, 10).unwrap();

        let stats =
            accumulate_samples(&definition, &mut buffers, &params, &mut StdRng::seed_from_u64(1));

        assert_eq!(stats, AccumulateStats { plotted: 0, discarded: 40 });
        assert_eq!(buffers.total_hits(), 0);
    }

    #[test]
    fn final_transform_moves_samples_but_not_the_orbit() {
        // Orbit stays put (identity); the final transform pushes every sample
        // out of view, so nothing lands even though the orbit is in view.
        let mut definition = identity_definition(ColourMap::solid(Colour::WHITE));
        definition.set_final_transform(Transform::new(
            AffineTransform::new(1.0, 0.0, 0.0, 1.0, 5.0, 0.0),
            Variation::Linear,
            0.0,
        ));
        let mut buffers = buffers(8, 8);
        let params = ChaosGameParams::new(3, 0, 4).unwrap();

        let stats =
            accumulate_samples(&definition, &mut buffers, &params, &mut StdRng::seed_from_u64(6));

        assert_eq!(stats.discarded, 12);
        assert_eq!(buffers.total_hits(), 0);
    }

    #[test]
    fn colour_recurrence_converges_towards_the_transform_weight() {
        // One transform with weight 1: c halves its distance to 1 every step.
        let definition = FlameDefinition::new(
            vec![Transform::new(AffineTransform::IDENTITY, Variation::Linear, 1.0)],
            Transform::identity(),
            Arc::new(ColourMap::new(vec![Colour::BLACK, Colour::WHITE]).unwrap()),
        )
        .unwrap();
        let mut buffers = buffers(4, 4);
        let params = ChaosGameParams::new(1, 0, 60).unwrap();

        accumulate_samples(&definition, &mut buffers, &params, &mut StdRng::seed_from_u64(8));

        let offset = (0..16).find(|&i| buffers.hit_count(i) > 0).unwrap();
        let sum = buffers.colour_sum(offset);
        assert!(sum.r / 60.0 > 0.95);
    }
}

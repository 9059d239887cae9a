//! Fixed-size particle storage.

use super::distribution::{CloudDistribution, DistributionError};
use super::particle::Particle;
use super::sampler::UniformSampler;

/// A fixed-size collection of cloud particles plus the distribution used to
/// (re)generate them.
///
/// All particles are created up front; the count never changes afterwards.
/// The store is mutated only by the [`Simulator`](super::Simulator), and
/// reordered in place by [`sort_back_to_front`](super::sort_back_to_front)
/// once per frame before drawing.
pub struct ParticleStore {
    particles: Vec<Particle>,
    distribution: CloudDistribution,
}

impl ParticleStore {
    /// Populate a store of exactly `count` particles.
    ///
    /// Each particle is sampled independently, in a fixed per-particle
    /// order: life, position, velocity, size. Color is the distribution's
    /// fixed spawn color. Fails fast on a degenerate distribution rather
    /// than producing NaN particles.
    pub fn generate<S: UniformSampler + ?Sized>(
        count: usize,
        distribution: CloudDistribution,
        sampler: &mut S,
    ) -> Result<Self, DistributionError> {
        distribution.validate()?;

        let particles = (0..count)
            .map(|_| {
                let life = distribution.sample_life(sampler);
                Particle {
                    life,
                    max_life: life,
                    position: distribution.sample_position(sampler),
                    velocity: distribution.sample_velocity(sampler),
                    size: distribution.sample_size(sampler),
                    color: distribution.color,
                }
            })
            .collect();

        Ok(Self {
            particles,
            distribution,
        })
    }

    /// Number of particles in the store.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The particles, in current draw order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the simulator and the sorter.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// The distribution particles respawn from.
    #[inline]
    pub fn distribution(&self) -> &CloudDistribution {
        &self.distribution
    }
}

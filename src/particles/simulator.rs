//! Per-frame particle simulation.

use super::distribution::Span;
use super::sampler::UniformSampler;
use super::store::ParticleStore;
use crate::math::Vector3;

/// Axis-aligned containment volume for the simulation.
///
/// This is soft containment: a particle may overshoot the volume by one
/// frame's travel before the bounce takes effect.
#[derive(Debug, Clone, Copy)]
pub struct SimulationBounds {
    /// X range.
    pub x: Span,
    /// Y range.
    pub y: Span,
    /// Z range.
    pub z: Span,
}

impl Default for SimulationBounds {
    fn default() -> Self {
        Self {
            x: Span::new(-5.0, 5.0),
            y: Span::new(1.0, 5.0),
            z: Span::new(-5.0, 5.0),
        }
    }
}

impl SimulationBounds {
    /// Create bounds from per-axis spans.
    pub const fn new(x: Span, y: Span, z: Span) -> Self {
        Self { x, y, z }
    }

    /// Whether a point lies inside the volume on every axis.
    #[inline]
    pub fn contains(&self, point: &Vector3) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)
    }
}

/// Advances every particle in a store once per frame.
pub struct Simulator {
    bounds: SimulationBounds,
}

impl Simulator {
    /// Create a simulator with the given containment volume.
    pub fn new(bounds: SimulationBounds) -> Self {
        Self { bounds }
    }

    /// The containment volume.
    #[inline]
    pub fn bounds(&self) -> &SimulationBounds {
        &self.bounds
    }

    /// Advance every particle by `dt` seconds, in place.
    ///
    /// Per particle, in order: age, respawn if expired, integrate, bounce.
    /// Respawn draws life, position, and velocity from the store's
    /// distribution (in that order) and leaves size and color untouched.
    /// The bounce negates the whole velocity vector, not just the violated
    /// axis; that coarse reflection is the intended behavior.
    ///
    /// Infallible; `dt = 0` leaves in-bounds particles bit-identical, and a
    /// large `dt` may overshoot the bounds before the bounce with no
    /// sub-stepping.
    pub fn update<S: UniformSampler + ?Sized>(
        &self,
        store: &mut ParticleStore,
        sampler: &mut S,
        dt: f32,
    ) {
        let distribution = *store.distribution();

        for particle in store.particles_mut() {
            particle.life -= dt;

            if particle.life <= 0.0 {
                let life = distribution.sample_life(sampler);
                particle.position = distribution.sample_position(sampler);
                particle.velocity = distribution.sample_velocity(sampler);
                particle.life = life;
                particle.max_life = life;
            }

            particle.position += particle.velocity * dt;

            if !self.bounds.contains(&particle.position) {
                particle.velocity = -particle.velocity;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::distribution::CloudDistribution;
    use crate::particles::sampler::{EntropySampler, SequenceSampler};

    fn test_store(count: usize) -> ParticleStore {
        let mut sampler = EntropySampler::from_seed(99);
        ParticleStore::generate(count, CloudDistribution::default(), &mut sampler)
            .expect("valid distribution")
    }

    #[test]
    fn test_zero_dt_is_a_noop() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(50);
        let mut sampler = EntropySampler::from_seed(1);

        let before: Vec<_> = store.particles().to_vec();
        simulator.update(&mut store, &mut sampler, 0.0);

        for (a, b) in before.iter().zip(store.particles()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
            assert_eq!(a.life, b.life);
            assert_eq!(a.max_life, b.max_life);
        }
    }

    #[test]
    fn test_life_invariant_over_many_frames() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(100);
        let mut sampler = EntropySampler::from_seed(2);

        for _ in 0..2000 {
            simulator.update(&mut store, &mut sampler, 0.05);
            for particle in store.particles() {
                assert!(particle.life >= 0.0);
                assert!(particle.life <= particle.max_life);
            }
        }
    }

    #[test]
    fn test_integration_moves_by_velocity_times_dt() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(1);
        let mut sampler = EntropySampler::from_seed(3);

        {
            let particle = &mut store.particles_mut()[0];
            particle.position = Vector3::new(0.0, 3.0, 0.0);
            particle.velocity = Vector3::new(1.0, 0.0, -2.0);
            particle.life = 10.0;
            particle.max_life = 10.0;
        }

        simulator.update(&mut store, &mut sampler, 0.5);
        let particle = &store.particles()[0];
        assert!(particle.position.approx_eq(&Vector3::new(0.5, 3.0, -1.0), 1e-6));
        assert_eq!(particle.life, 9.5);
    }

    #[test]
    fn test_boundary_reflection_negates_whole_vector() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(1);
        let mut sampler = EntropySampler::from_seed(4);

        // Sitting on the +x face, moving outward with a y component; one
        // step pushes it outside and every component must flip.
        {
            let particle = &mut store.particles_mut()[0];
            particle.position = Vector3::new(5.0, 3.0, 0.0);
            particle.velocity = Vector3::new(2.0, 0.5, -1.0);
            particle.life = 10.0;
            particle.max_life = 10.0;
        }

        simulator.update(&mut store, &mut sampler, 0.1);
        let particle = &store.particles()[0];
        assert!(particle.position.x > 5.0);
        assert!(particle.velocity.approx_eq(&Vector3::new(-2.0, -0.5, 1.0), 1e-6));
    }

    #[test]
    fn test_large_dt_overshoots_then_reflects() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(1);
        let mut sampler = EntropySampler::from_seed(5);

        {
            let particle = &mut store.particles_mut()[0];
            particle.position = Vector3::new(0.0, 3.0, 0.0);
            particle.velocity = Vector3::new(1.0, 0.0, 0.0);
            particle.life = 100.0;
            particle.max_life = 100.0;
        }

        // 60 seconds in one step: far past the +x face, no sub-stepping.
        simulator.update(&mut store, &mut sampler, 60.0);
        let particle = &store.particles()[0];
        assert!(particle.position.approx_eq(&Vector3::new(60.0, 3.0, 0.0), 1e-4));
        assert_eq!(particle.velocity, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_respawn_resets_life_position_velocity_only() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(1);
        // Deterministic respawn: life midpoint 15, position (0, 3, 0),
        // velocity zero.
        let mut sampler = SequenceSampler::midpoint();

        let (size_before, color_before) = {
            let particle = &mut store.particles_mut()[0];
            particle.life = 0.01;
            (particle.size, particle.color)
        };

        simulator.update(&mut store, &mut sampler, 0.5);
        let particle = &store.particles()[0];
        assert!((particle.life - 15.0).abs() < 1e-6);
        assert_eq!(particle.max_life, particle.life);
        assert!(particle.position.approx_eq(&Vector3::new(0.0, 3.0, 0.0), 1e-6));
        assert_eq!(particle.velocity, Vector3::ZERO);
        // Size and color survive the respawn.
        assert_eq!(particle.size, size_before);
        assert_eq!(particle.color, color_before);
    }

    #[test]
    fn test_respawn_velocity_is_horizontal() {
        let simulator = Simulator::new(SimulationBounds::default());
        let mut store = test_store(64);
        let mut sampler = EntropySampler::from_seed(6);

        for particle in store.particles_mut() {
            particle.life = 0.001;
            particle.velocity = Vector3::new(0.0, 9.0, 0.0);
        }

        simulator.update(&mut store, &mut sampler, 0.01);
        for particle in store.particles() {
            assert_eq!(particle.velocity.y, 0.0);
        }
    }
}

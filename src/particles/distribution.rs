//! Cloud distribution parameters.
//!
//! A [`CloudDistribution`] describes the sampling domain used both when the
//! store is first populated and whenever an expired particle respawns.

use super::sampler::UniformSampler;
use crate::math::{consts, Color, Vector3};
use thiserror::Error;

/// Errors produced by distribution validation.
#[derive(Error, Debug)]
pub enum DistributionError {
    /// A range has min > max.
    #[error("inverted {name} range: {min} > {max}")]
    InvertedSpan {
        /// Which range is inverted.
        name: &'static str,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },

    /// Life span must start above zero or freshly spawned particles would be
    /// born expired.
    #[error("life span must be positive, got minimum {0}")]
    NonPositiveLife(f32),

    /// Billboard size must be positive.
    #[error("particle size must be positive, got minimum {0}")]
    NonPositiveSize(f32),

    /// Cylinder radius must be positive.
    #[error("cylinder radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}

/// A closed interval used as a sampling range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Midpoint of the span.
    #[inline]
    pub fn center(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Half the width of the span.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        (self.max - self.min) * 0.5
    }

    /// Whether a value lies inside the span (inclusive).
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Draw a uniform value from the span.
    #[inline]
    pub fn sample<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> f32 {
        sampler.sample(self.min, self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), DistributionError> {
        if self.min > self.max {
            return Err(DistributionError::InvertedSpan {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Spatial sampling domain for the cloud volume.
#[derive(Debug, Clone, Copy)]
pub enum CloudShape {
    /// Axis-aligned box given by per-axis spans.
    Box {
        /// X range.
        x: Span,
        /// Y range.
        y: Span,
        /// Z range.
        z: Span,
    },
    /// Upright cylinder around the y axis.
    Cylinder {
        /// Maximum horizontal distance from the axis.
        radius: f32,
        /// Vertical range around the offset.
        height: Span,
        /// Vertical offset of the cylinder center.
        y_offset: f32,
    },
}

impl CloudShape {
    /// Draw a position from the shape.
    ///
    /// Sample order is fixed: box draws x, y, z; cylinder draws radius,
    /// angle, height. Deterministic samplers rely on this order.
    pub fn sample_position<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> Vector3 {
        match self {
            CloudShape::Box { x, y, z } => Vector3::new(
                x.sample(sampler),
                y.sample(sampler),
                z.sample(sampler),
            ),
            CloudShape::Cylinder { radius, height, y_offset } => {
                let r = sampler.sample(0.0, *radius);
                let angle = sampler.sample(0.0, consts::TWO_PI);
                let h = height.sample(sampler);
                Vector3::new(r * angle.cos(), h + y_offset, r * angle.sin())
            }
        }
    }

    /// Whether a point lies inside the shape (inclusive, with a small
    /// epsilon on the cylinder radius for trigonometric rounding).
    pub fn contains(&self, point: &Vector3) -> bool {
        match self {
            CloudShape::Box { x, y, z } => {
                x.contains(point.x) && y.contains(point.y) && z.contains(point.z)
            }
            CloudShape::Cylinder { radius, height, y_offset } => {
                let r2 = point.x * point.x + point.z * point.z;
                r2 <= radius * radius + consts::EPSILON && height.contains(point.y - y_offset)
            }
        }
    }

    /// Horizontal sampling spans (x, z) used to scale drift velocity.
    fn horizontal_spans(&self) -> (Span, Span) {
        match self {
            CloudShape::Box { x, z, .. } => (*x, *z),
            CloudShape::Cylinder { radius, .. } => {
                let span = Span::new(-*radius, *radius);
                (span, span)
            }
        }
    }

    fn validate(&self) -> Result<(), DistributionError> {
        match self {
            CloudShape::Box { x, y, z } => {
                x.validate("x")?;
                y.validate("y")?;
                z.validate("z")?;
            }
            CloudShape::Cylinder { radius, height, .. } => {
                if *radius <= 0.0 {
                    return Err(DistributionError::NonPositiveRadius(*radius));
                }
                height.validate("height")?;
            }
        }
        Ok(())
    }
}

/// Immutable sampling parameters for populating and respawning the cloud.
#[derive(Debug, Clone, Copy)]
pub struct CloudDistribution {
    /// Spatial spawn domain.
    pub shape: CloudShape,
    /// Billboard half-extent range.
    pub size: Span,
    /// Life span range in seconds.
    pub life: Span,
    /// Peak horizontal drift speed in world units per second.
    pub drift_speed: f32,
    /// Fixed spawn color.
    pub color: Color,
}

impl Default for CloudDistribution {
    fn default() -> Self {
        Self {
            shape: CloudShape::Box {
                x: Span::new(-3.0, 3.0),
                y: Span::new(2.0, 4.0),
                z: Span::new(-3.0, 3.0),
            },
            size: Span::new(0.2, 0.5),
            life: Span::new(10.0, 20.0),
            drift_speed: 0.01,
            color: Color::gray(0.9, 0.7),
        }
    }
}

impl CloudDistribution {
    /// A flat cylindrical cloud of the given overall size, hovering above
    /// the origin.
    pub fn cylinder_preset(cloud_size: f32) -> Self {
        Self {
            shape: CloudShape::Cylinder {
                radius: cloud_size * 0.5,
                height: Span::new(-cloud_size * 0.2, cloud_size * 0.2),
                y_offset: cloud_size * 0.2,
            },
            ..Self::default()
        }
    }

    /// Check the configuration for degenerate ranges. Called once at store
    /// construction; sampling itself assumes a valid configuration.
    pub fn validate(&self) -> Result<(), DistributionError> {
        self.shape.validate()?;
        self.size.validate("size")?;
        self.life.validate("life")?;
        if self.size.min <= 0.0 {
            return Err(DistributionError::NonPositiveSize(self.size.min));
        }
        if self.life.min <= 0.0 {
            return Err(DistributionError::NonPositiveLife(self.life.min));
        }
        Ok(())
    }

    /// Draw a life span in seconds.
    #[inline]
    pub fn sample_life<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> f32 {
        self.life.sample(sampler)
    }

    /// Draw a spawn position from the spatial domain.
    #[inline]
    pub fn sample_position<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> Vector3 {
        self.shape.sample_position(sampler)
    }

    /// Draw a billboard half-extent.
    #[inline]
    pub fn sample_size<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> f32 {
        self.size.sample(sampler)
    }

    /// Draw a drift velocity.
    ///
    /// The vector is horizontal-only: each of x and z is a draw from the
    /// horizontal domain, recentred and scaled down to at most
    /// `drift_speed`; y is exactly zero. Spawning never introduces vertical
    /// motion, only boundary reflection touches the y component.
    pub fn sample_velocity<S: UniformSampler + ?Sized>(&self, sampler: &mut S) -> Vector3 {
        let (x_span, z_span) = self.shape.horizontal_spans();
        Vector3::new(
            self.drift_component(&x_span, sampler),
            0.0,
            self.drift_component(&z_span, sampler),
        )
    }

    fn drift_component<S: UniformSampler + ?Sized>(&self, span: &Span, sampler: &mut S) -> f32 {
        let half_extent = span.half_extent();
        if half_extent <= 0.0 {
            return 0.0;
        }
        self.drift_speed * (span.sample(sampler) - span.center()) / half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::sampler::{EntropySampler, SequenceSampler};

    #[test]
    fn test_validate_rejects_inverted_span() {
        let distribution = CloudDistribution {
            size: Span::new(0.5, 0.2),
            ..Default::default()
        };
        assert!(matches!(
            distribution.validate(),
            Err(DistributionError::InvertedSpan { name: "size", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_life() {
        let distribution = CloudDistribution {
            life: Span::new(0.0, 20.0),
            ..Default::default()
        };
        assert!(matches!(
            distribution.validate(),
            Err(DistributionError::NonPositiveLife(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_radius() {
        let mut distribution = CloudDistribution::cylinder_preset(4.0);
        if let CloudShape::Cylinder { ref mut radius, .. } = distribution.shape {
            *radius = 0.0;
        }
        assert!(matches!(
            distribution.validate(),
            Err(DistributionError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_box_positions_stay_in_domain() {
        let distribution = CloudDistribution::default();
        for seed in 0..8 {
            let mut sampler = EntropySampler::from_seed(seed);
            for _ in 0..500 {
                let p = distribution.sample_position(&mut sampler);
                assert!(distribution.shape.contains(&p), "{p:?} escaped the box");
            }
        }
    }

    #[test]
    fn test_cylinder_positions_stay_in_domain() {
        let distribution = CloudDistribution::cylinder_preset(4.0);
        for seed in 0..8 {
            let mut sampler = EntropySampler::from_seed(seed);
            for _ in 0..500 {
                let p = distribution.sample_position(&mut sampler);
                assert!(distribution.shape.contains(&p), "{p:?} escaped the cylinder");
            }
        }
    }

    #[test]
    fn test_velocity_is_horizontal_and_bounded() {
        let distribution = CloudDistribution::default();
        let mut sampler = EntropySampler::from_seed(3);
        for _ in 0..500 {
            let v = distribution.sample_velocity(&mut sampler);
            assert_eq!(v.y, 0.0);
            assert!(v.x.abs() <= distribution.drift_speed);
            assert!(v.z.abs() <= distribution.drift_speed);
        }
    }

    #[test]
    fn test_velocity_matches_reference_expression() {
        // For the default centered [-3, 3] domain the drift component
        // reduces to drift_speed * draw / 3.
        let distribution = CloudDistribution::default();
        let mut sampler = SequenceSampler::new(vec![1.0, 0.0]);
        let v = distribution.sample_velocity(&mut sampler);
        assert!((v.x - 0.01).abs() < 1e-6);
        assert!((v.z + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_cylinder_sample_order() {
        // radius, angle, height: fractions pick r = radius, angle = 0,
        // h = height midpoint.
        let distribution = CloudDistribution::cylinder_preset(4.0);
        let mut sampler = SequenceSampler::new(vec![1.0, 0.0, 0.5]);
        let p = distribution.sample_position(&mut sampler);
        assert!(p.approx_eq(&Vector3::new(2.0, 0.8, 0.0), 1e-5));
    }
}

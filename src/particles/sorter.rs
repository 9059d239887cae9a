//! Back-to-front ordering for alpha-blended billboards.

use super::particle::Particle;
use crate::math::Vector3;

/// Reorder particles so the farthest from the camera draws first.
///
/// Alpha blending composites correctly only when fragments arrive
/// far-to-near, so the draw loop consumes particles in this order every
/// frame. Distances are compared squared to skip the square root. The sort
/// is unstable: particles at equal distance land in unspecified relative
/// order, which is invisible in the blended result.
pub fn sort_back_to_front(particles: &mut [Particle], camera_position: Vector3) {
    particles.sort_unstable_by(|a, b| {
        let da = a.position.distance_to_squared(&camera_position);
        let db = b.position.distance_to_squared(&camera_position);
        db.total_cmp(&da)
    });
}

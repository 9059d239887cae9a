//! Fly controls: WASD-style camera translation.

use crate::camera::PerspectiveCamera;
use crate::math::Vector3;

/// Movement directions the controls track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    /// Move along the camera's forward axis.
    Forward,
    /// Move against the camera's forward axis.
    Backward,
    /// Strafe against the camera's right axis.
    Left,
    /// Strafe along the camera's right axis.
    Right,
}

/// Fly controls translating the camera from held-key state.
///
/// The struct is windowing-agnostic: the event loop maps its key events to
/// [`MoveKey`] presses, and `update` applies the accumulated movement once
/// per frame, scaled by elapsed time. Position and target move together, so
/// the view direction never changes.
pub struct FlyControls {
    /// Movement speed in world units per second.
    pub speed: f32,
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl Default for FlyControls {
    fn default() -> Self {
        Self {
            speed: 3.0,
            forward: false,
            backward: false,
            left: false,
            right: false,
        }
    }
}

impl FlyControls {
    /// Create new fly controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create fly controls with a movement speed.
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Record a key press or release.
    pub fn set_pressed(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    /// Whether any movement key is currently held.
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Apply the held-key movement to the camera, scaled by `dt` seconds.
    pub fn update(&self, camera: &mut PerspectiveCamera, dt: f32) {
        if !self.is_moving() || dt <= 0.0 {
            return;
        }

        let forward = camera.forward();
        let right = camera.right();

        let mut movement = Vector3::ZERO;
        if self.forward {
            movement += forward;
        }
        if self.backward {
            movement -= forward;
        }
        if self.right {
            movement += right;
        }
        if self.left {
            movement -= right;
        }

        let delta = movement * (self.speed * dt);
        camera.set_position(camera.position + delta);
        camera.set_target(camera.target + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_moves_along_view_direction() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = FlyControls::with_speed(2.0);
        controls.set_pressed(MoveKey::Forward, true);

        controls.update(&mut camera, 0.5);

        // Default camera looks down -z; 2.0 * 0.5 = 1 unit forward
        assert!(camera.position.approx_eq(&Vector3::new(0.0, 0.0, 7.0), 1e-6));
        assert!(camera.target.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut camera = PerspectiveCamera::default();
        let start = camera.position;
        let mut controls = FlyControls::new();
        controls.set_pressed(MoveKey::Left, true);
        controls.set_pressed(MoveKey::Right, true);

        controls.update(&mut camera, 1.0);
        assert!(camera.position.approx_eq(&start, 1e-6));
    }

    #[test]
    fn test_release_stops_movement() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = FlyControls::new();
        controls.set_pressed(MoveKey::Backward, true);
        controls.set_pressed(MoveKey::Backward, false);

        let start = camera.position;
        controls.update(&mut camera, 1.0);
        assert_eq!(camera.position, start);
    }
}

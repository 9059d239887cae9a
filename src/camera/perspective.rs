//! Perspective camera.

use crate::core::Id;
use crate::math::{Matrix4, Vector3};

/// A perspective projection camera.
///
/// The simulation core only ever reads `position` (for depth sorting); the
/// renderer pulls the cached view and projection matrices.
pub struct PerspectiveCamera {
    /// Unique ID.
    id: Id,
    /// Field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vector3,
    /// Camera target (look-at point).
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
    /// View matrix.
    view_matrix: Matrix4,
    /// Projection matrix.
    projection_matrix: Matrix4,
    /// Whether matrices need updating.
    needs_update: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(45.0, 4.0 / 3.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera looking at the origin from (0, 0, 8).
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            id: Id::new(),
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, 8.0),
            target: Vector3::ZERO,
            up: Vector3::UP,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            needs_update: true,
        };
        camera.update_matrices();
        camera
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Set the camera position.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.needs_update = true;
    }

    /// Set the camera target.
    pub fn set_target(&mut self, target: Vector3) {
        self.target = target;
        self.needs_update = true;
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.needs_update = true;
    }

    /// Get the view matrix.
    pub fn view_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_matrix
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.projection_matrix
    }

    /// Update the cached matrices.
    pub fn update_matrices(&mut self) {
        self.view_matrix = Matrix4::look_at(&self.position, &self.target, &self.up);
        self.projection_matrix =
            Matrix4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.needs_update = false;
    }

    /// Get the forward direction.
    pub fn forward(&self) -> Vector3 {
        (self.target - self.position).normalized()
    }

    /// Get the right direction.
    pub fn right(&self) -> Vector3 {
        self.forward().cross(&self.up).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_right() {
        let camera = PerspectiveCamera::default();
        // Looking down -z from (0, 0, 8)
        assert!(camera.forward().approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(camera.right().approx_eq(&Vector3::UNIT_X, 1e-6));
    }

    #[test]
    fn test_view_matrix_tracks_position() {
        let mut camera = PerspectiveCamera::default();
        camera.set_position(Vector3::new(0.0, 0.0, 4.0));
        camera.set_target(Vector3::new(0.0, 0.0, -4.0));
        let eye = camera.position;
        let transformed = camera.view_matrix().transform_point(&eye);
        assert!(transformed.approx_eq(&Vector3::ZERO, 1e-5));
    }
}

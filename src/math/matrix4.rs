//! 4x4 Matrix implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for 3D transformations (model, view, projection matrices).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Create a translation matrix.
    pub fn from_translation(v: &Vector3) -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                v.x, v.y, v.z, 1.0,
            ],
        }
    }

    /// Create a scale matrix.
    pub fn from_scale(v: &Vector3) -> Self {
        Self {
            elements: [
                v.x, 0.0, 0.0, 0.0,
                0.0, v.y, 0.0, 0.0,
                0.0, 0.0, v.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a uniform scale matrix.
    #[inline]
    pub fn from_uniform_scale(s: f32) -> Self {
        Self::from_scale(&Vector3::splat(s))
    }

    /// Extract the position (translation) component.
    #[inline]
    pub fn get_position(&self) -> Vector3 {
        Vector3 {
            x: self.elements[12],
            y: self.elements[13],
            z: self.elements[14],
        }
    }

    /// Create a view matrix (look-at).
    /// Returns the inverse of the camera transform.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let f = (*target - *eye).normalized(); // forward
        let r = f.cross(up).normalized();      // right
        let u = r.cross(&f);                   // up

        // View matrix is inverse of camera matrix
        // For orthonormal basis, inverse = transpose for rotation part
        // Translation is -dot(axis, eye) for each axis
        Self {
            elements: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
            ],
        }
    }

    /// Create a perspective projection matrix.
    /// Uses wgpu/Vulkan depth range (0 to 1).
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();

        // wgpu uses 0-1 depth range (not -1 to 1 like OpenGL)
        Self {
            elements: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, far / (near - far), -1.0,
                0.0, 0.0, (near * far) / (near - far), 0.0,
            ],
        }
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let a = &self.elements;
        let b = &other.elements;

        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }

        Self { elements: out }
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        let w = 1.0 / (e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15]);
        Vector3 {
            x: (e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12]) * w,
            y: (e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13]) * w,
            z: (e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14]) * w,
        }
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Convert to column-major 2D array (for GPU uniform buffers).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = Matrix4::IDENTITY;
        let v = Vector3::new(1.0, 2.0, 3.0);
        let result = m.transform_point(&v);
        assert!(result.approx_eq(&v, 1e-6));
    }

    #[test]
    fn test_translation() {
        let m = Matrix4::from_translation(&Vector3::new(10.0, 20.0, 30.0));
        let result = m.transform_point(&Vector3::ZERO);
        assert!(result.approx_eq(&Vector3::new(10.0, 20.0, 30.0), 1e-6));
    }

    #[test]
    fn test_translate_then_scale() {
        // Billboard model transform: translate(position) * scale(size)
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            .multiply(&Matrix4::from_uniform_scale(2.0));
        // Quad corner (0.5, 0.5, 0) lands at position + size * corner
        let corner = m.transform_point(&Vector3::new(0.5, 0.5, 0.0));
        assert!(corner.approx_eq(&Vector3::new(2.0, 3.0, 3.0), 1e-6));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vector3::new(0.0, 0.0, 8.0);
        let view = Matrix4::look_at(&eye, &Vector3::ZERO, &Vector3::UP);
        let result = view.transform_point(&eye);
        assert!(result.approx_eq(&Vector3::ZERO, 1e-5));
        // A point in front of the camera ends up on the negative z axis
        let ahead = view.transform_point(&Vector3::ZERO);
        assert!(ahead.approx_eq(&Vector3::new(0.0, 0.0, -8.0), 1e-5));
    }

    #[test]
    fn test_multiply_associates_with_transform() {
        let t = Matrix4::from_translation(&Vector3::new(5.0, 0.0, 0.0));
        let s = Matrix4::from_uniform_scale(3.0);
        let v = Vector3::new(1.0, 1.0, 1.0);
        let combined = t.multiply(&s).transform_point(&v);
        let stepwise = t.transform_point(&s.transform_point(&v));
        assert!(combined.approx_eq(&stepwise, 1e-6));
    }
}

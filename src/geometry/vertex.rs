//! Vertex types and layouts.

use bytemuck::{Pod, Zeroable};

/// Simple position-only vertex.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PositionVertex {
    /// Position in local space.
    pub position: [f32; 3],
}

impl PositionVertex {
    /// Create a new position vertex.
    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }

    /// Get the vertex buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// The shared unit billboard quad, as a triangle strip.
///
/// Corners at (±0.5, ±0.5, 0); every particle draws this quad through its
/// own model transform.
pub const fn unit_quad() -> [PositionVertex; 4] {
    [
        PositionVertex::new([-0.5, -0.5, 0.0]),
        PositionVertex::new([0.5, -0.5, 0.0]),
        PositionVertex::new([-0.5, 0.5, 0.0]),
        PositionVertex::new([0.5, 0.5, 0.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_quad_spans_unit_square() {
        let quad = unit_quad();
        assert_eq!(quad.len(), 4);
        for vertex in &quad {
            assert_eq!(vertex.position[0].abs(), 0.5);
            assert_eq!(vertex.position[1].abs(), 0.5);
            assert_eq!(vertex.position[2], 0.0);
        }
    }
}

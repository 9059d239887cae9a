//! Billboard particle renderer.
//!
//! Draws a sorted particle slice as alpha-blended quads, one draw call per
//! particle over a shared unit quad. Per-draw state (model transform and
//! color) lives in a dynamic-offset uniform buffer, so uniform values set
//! before a draw call apply to exactly that call.

use std::mem;

use super::{Context, RenderConfig};
use crate::camera::PerspectiveCamera;
use crate::geometry::{unit_quad, PositionVertex};
use crate::math::{Matrix4, Vector3};
use crate::particles::Particle;
use crate::texture::{SamplerSettings, Texture2D};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Render statistics for the current frame.
#[derive(Debug, Clone, Default)]
pub struct RenderInfo {
    /// Number of draw calls.
    pub draw_calls: u32,
    /// Number of triangles rendered.
    pub triangles: u32,
    /// Frame number.
    pub frame: u64,
}

impl RenderInfo {
    /// Reset the per-frame statistics.
    pub fn reset(&mut self) {
        self.draw_calls = 0;
        self.triangles = 0;
    }
}

/// Frame-level uniform data shared by every draw call.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GlobalsUniform {
    /// View matrix.
    view: [[f32; 4]; 4],
    /// Projection matrix.
    projection: [[f32; 4]; 4],
    /// Fog color (rgb) + unused.
    fog_color: [f32; 4],
    /// Fog mode index, density, start, end.
    fog_params: [f32; 4],
}

/// Per-draw uniform data: one slot per particle.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct DrawUniform {
    /// Model transform: translate(position) * scale(size).
    model: [[f32; 4]; 4],
    /// Particle tint.
    color: [f32; 4],
}

/// The billboard renderer.
///
/// Owns the render pipeline, the shared quad, the sprite bind group, and
/// the uniform buffers. One instance renders one particle cloud.
pub struct BillboardRenderer {
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u32,
    texture_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
    fog: super::FogSettings,
    capacity: u32,
    info: RenderInfo,
}

impl BillboardRenderer {
    /// Create a renderer for up to `capacity` particles, drawing the given
    /// sprite texture.
    pub fn new(ctx: &Context, config: &RenderConfig, sprite: &Texture2D, capacity: u32) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Billboard Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/billboard.wgsl").into()),
        });

        // Shared quad: 4 vertices, triangle strip
        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Billboard Quad Buffer"),
            contents: bytemuck::cast_slice(&unit_quad()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Globals (group 0)
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Billboard Globals Buffer"),
            size: mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Billboard Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(mem::size_of::<GlobalsUniform>() as u64),
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Billboard Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Per-draw slots (group 1, dynamic offset)
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let slot = mem::size_of::<DrawUniform>() as u64;
        let draw_stride = slot.div_ceil(align) * align;

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Billboard Draw Buffer"),
            size: draw_stride * capacity.max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Billboard Draw Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(slot),
                },
                count: None,
            }],
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Billboard Draw Bind Group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(slot),
                }),
            }],
        });

        // Sprite texture (group 2)
        let sampler = SamplerSettings::default().create(device);

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Billboard Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Billboard Texture Bind Group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(sprite.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Billboard Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &draw_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let alpha_blend = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Billboard Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[PositionVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(alpha_blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Depth-tested but read-only: draw order is already back-to-front
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = ctx
            .create_depth_texture()
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            pipeline,
            quad_buffer,
            globals_buffer,
            globals_bind_group,
            draw_buffer,
            draw_bind_group,
            draw_stride: draw_stride as u32,
            texture_bind_group,
            depth_view,
            clear_color: config.clear_color,
            fog: config.fog,
            capacity,
            info: RenderInfo::default(),
        }
    }

    /// Get render info for the last frame.
    #[inline]
    pub fn info(&self) -> &RenderInfo {
        &self.info
    }

    /// Maximum number of particles drawn per frame.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Update the fog settings.
    #[inline]
    pub fn set_fog(&mut self, fog: super::FogSettings) {
        self.fog = fog;
    }

    /// Handle resize: recreate the depth texture.
    pub fn resize(&mut self, ctx: &Context) {
        self.depth_view = ctx
            .create_depth_texture()
            .create_view(&wgpu::TextureViewDescriptor::default());
    }

    /// Draw a frame.
    ///
    /// `particles` must already be in back-to-front order; the renderer
    /// issues one draw call per particle in slice order without culling,
    /// batching, or instancing.
    pub fn draw(
        &mut self,
        ctx: &Context,
        camera: &mut PerspectiveCamera,
        particles: &[Particle],
    ) -> Result<(), wgpu::SurfaceError> {
        self.info.reset();
        self.info.frame += 1;

        let count = if particles.len() > self.capacity as usize {
            log::warn!(
                "particle count {} exceeds renderer capacity {}, truncating",
                particles.len(),
                self.capacity
            );
            self.capacity as usize
        } else {
            particles.len()
        };

        let globals = GlobalsUniform {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            fog_color: self.fog.color.to_array(),
            fog_params: [
                self.fog.mode.index() as f32,
                self.fog.density,
                self.fog.start,
                self.fog.end,
            ],
        };
        ctx.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        if count > 0 {
            let stride = self.draw_stride as usize;
            let mut slots = vec![0u8; stride * count];
            for (i, particle) in particles[..count].iter().enumerate() {
                let model = billboard_model(&particle.position, particle.size);
                let uniform = DrawUniform {
                    model: model.to_cols_array_2d(),
                    color: particle.color.to_array(),
                };
                let bytes = bytemuck::bytes_of(&uniform);
                slots[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
            }
            ctx.queue.write_buffer(&self.draw_buffer, 0, &slots);
        }

        let output = ctx.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx.create_command_encoder();

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Billboard Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
            render_pass.set_bind_group(2, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));

            for i in 0..count {
                let offset = i as u32 * self.draw_stride;
                render_pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
                render_pass.draw(0..4, 0..1);
            }
        }

        self.info.draw_calls = count as u32;
        self.info.triangles = count as u32 * 2;

        ctx.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Build the billboard model transform used by the draw loop:
/// translate to the particle position, then scale the unit quad uniformly.
pub(crate) fn billboard_model(position: &Vector3, size: f32) -> Matrix4 {
    Matrix4::from_translation(position).multiply(&Matrix4::from_uniform_scale(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billboard_model_places_quad_corners() {
        let model = billboard_model(&Vector3::new(2.0, 1.0, -3.0), 0.4);
        // Unit quad corner (0.5, 0.5, 0) scaled by 0.4 then translated
        let corner = model.transform_point(&Vector3::new(0.5, 0.5, 0.0));
        assert!(corner.approx_eq(&Vector3::new(2.2, 1.2, -3.0), 1e-6));
        // The quad stays world-axis aligned (no camera-facing rotation)
        let center = model.transform_point(&Vector3::ZERO);
        assert!(center.approx_eq(&Vector3::new(2.0, 1.0, -3.0), 1e-6));
    }

    #[test]
    fn test_draw_uniform_layout() {
        // The WGSL side expects a mat4 followed by a vec4
        assert_eq!(std::mem::size_of::<DrawUniform>(), 80);
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 160);
    }
}

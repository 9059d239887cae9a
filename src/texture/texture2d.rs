//! 2D texture implementation.

use crate::core::Id;
use crate::particles::UniformSampler;
use wgpu::util::DeviceExt;

/// A 2D texture.
pub struct Texture2D {
    /// Unique ID.
    id: Id,
    /// Texture width.
    width: u32,
    /// Texture height.
    height: u32,
    /// The GPU texture.
    texture: wgpu::Texture,
    /// Texture view.
    view: wgpu::TextureView,
    /// Texture format.
    format: wgpu::TextureFormat,
}

impl Texture2D {
    /// Create a new texture from RGBA8 data.
    /// Uses wgpu's create_texture_with_data which handles row alignment automatically.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label,
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            id: Id::new(),
            width,
            height,
            texture,
            view,
            format,
        }
    }

    /// Synthesize the procedural cloud sprite: a white square whose alpha
    /// falls off radially from the center, roughened by per-texel noise.
    /// The sprite is generated, not loaded from disk.
    pub fn radial_sprite(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: u32,
        sampler: &mut dyn UniformSampler,
    ) -> Self {
        let data = radial_sprite_pixels(size, sampler);
        Self::from_rgba8(device, queue, &data, size, size, Some("Cloud Sprite Texture"))
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get texture width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get texture height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the texture format.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Get the underlying wgpu texture.
    #[inline]
    pub fn wgpu_texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Get the texture view.
    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

/// Generate the RGBA8 pixels of the radial cloud sprite.
///
/// Alpha at distance `d` from the center is `max(0, 1 - 2d)`, modulated by
/// `0.7 + 0.3 * noise` with noise drawn uniformly from the given sampler;
/// RGB is solid white.
pub fn radial_sprite_pixels(size: u32, sampler: &mut dyn UniformSampler) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 / size as f32 - 0.5;
            let dy = y as f32 / size as f32 - 0.5;
            let distance = (dx * dx + dy * dy).sqrt();

            let mut alpha = (1.0 - distance * 2.0).max(0.0);
            alpha *= 0.7 + 0.3 * sampler.sample(0.0, 1.0);

            data.extend_from_slice(&[255, 255, 255, (alpha * 255.0) as u8]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{EntropySampler, SequenceSampler};

    #[test]
    fn test_sprite_pixel_count() {
        let mut sampler = EntropySampler::from_seed(1);
        let data = radial_sprite_pixels(64, &mut sampler);
        assert_eq!(data.len(), 64 * 64 * 4);
    }

    #[test]
    fn test_sprite_fades_radially() {
        // Without noise (fraction 1.0 => modulation factor 1.0) the alpha
        // is purely radial: opaque-ish center, transparent corners.
        let mut sampler = SequenceSampler::new(vec![1.0]);
        let size = 64u32;
        let data = radial_sprite_pixels(size, &mut sampler);

        let alpha_at = |x: u32, y: u32| data[((y * size + x) * 4 + 3) as usize];
        assert!(alpha_at(size / 2, size / 2) > 200);
        assert_eq!(alpha_at(0, 0), 0);
        assert_eq!(alpha_at(size - 1, size - 1), 0);
        assert!(data.iter().step_by(4).all(|&r| r == 255));
    }
}

//! Main engine entry point.

use super::{BillboardRenderer, Clock, Context, ContextError, RenderConfig};
use crate::camera::PerspectiveCamera;
use crate::particles::{Particle, UniformSampler};
use crate::texture::Texture2D;

/// The main Cumulus engine.
/// Owns the rendering context, the billboard renderer, and frame timing.
pub struct Engine {
    /// The wgpu context.
    pub context: Context,
    /// The billboard renderer.
    pub renderer: BillboardRenderer,
    /// The clock for timing.
    pub clock: Clock,
}

impl Engine {
    /// Create a new engine from a window handle.
    ///
    /// Builds the wgpu context, synthesizes the procedural cloud sprite
    /// (noise drawn from `sampler`), and sets up the billboard renderer for
    /// up to `capacity` particles.
    ///
    /// # Arguments
    /// * `window` - A window handle (e.g., from winit)
    /// * `width` / `height` - Initial size in pixels
    /// * `config` - Render configuration owned by the caller
    /// * `capacity` - Fixed particle budget
    ///
    /// # Safety
    /// The window must outlive the engine.
    pub async fn new<W>(
        window: W,
        width: u32,
        height: u32,
        config: RenderConfig,
        capacity: u32,
        sampler: &mut dyn UniformSampler,
    ) -> Result<Self, ContextError>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        let context = Context::new(window, width, height, &config).await?;
        let sprite = Texture2D::radial_sprite(&context.device, &context.queue, 64, sampler);
        let renderer = BillboardRenderer::new(&context, &config, &sprite, capacity);
        let clock = Clock::start_new();

        Ok(Self {
            context,
            renderer,
            clock,
        })
    }

    /// Handle resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.renderer.resize(&self.context);
        }
    }

    /// Reconfigure the surface after a Lost/Outdated error.
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Get aspect ratio.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    /// Get delta time since last frame, in seconds.
    pub fn delta_time(&mut self) -> f32 {
        self.clock.get_delta() as f32
    }

    /// Render a frame: the particle slice must already be sorted
    /// back-to-front relative to `camera`.
    pub fn render(
        &mut self,
        camera: &mut PerspectiveCamera,
        particles: &[Particle],
    ) -> Result<(), wgpu::SurfaceError> {
        self.renderer.draw(&self.context, camera, particles)
    }
}

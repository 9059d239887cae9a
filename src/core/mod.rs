//! # Core Module
//!
//! Core engine functionality: wgpu context management, the billboard
//! renderer, and timing utilities.

mod engine;
mod context;
mod renderer;
mod clock;
mod id;

pub use engine::Engine;
pub use context::{Context, ContextError};
pub use renderer::{BillboardRenderer, RenderInfo};
pub use clock::Clock;
pub use id::Id;

use crate::math::Color;

/// Distance fog falloff curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FogMode {
    /// Linear falloff between a start and end distance.
    #[default]
    Linear,
    /// Exponential falloff by density.
    Exponential,
    /// Exponential-squared falloff by density.
    ExponentialSquared,
}

impl FogMode {
    /// Shader-side mode index.
    #[inline]
    pub fn index(&self) -> u32 {
        match self {
            FogMode::Linear => 0,
            FogMode::Exponential => 1,
            FogMode::ExponentialSquared => 2,
        }
    }
}

/// Distance fog settings, applied to billboard fragments by view depth.
#[derive(Debug, Clone, Copy)]
pub struct FogSettings {
    /// Falloff curve.
    pub mode: FogMode,
    /// Fog color blended in as fragments recede.
    pub color: Color,
    /// Density, used by the exponential modes.
    pub density: f32,
    /// Distance where linear fog begins.
    pub start: f32,
    /// Distance where linear fog fully covers.
    pub end: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            mode: FogMode::Linear,
            color: Color::rgb(0.7, 0.7, 0.8),
            density: 0.15,
            start: 5.0,
            end: 25.0,
        }
    }
}

/// Render configuration options, owned by the main loop and passed down
/// explicitly; there is no ambient render state.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Power preference for GPU selection.
    pub power_preference: wgpu::PowerPreference,
    /// Present mode (vsync).
    pub present_mode: wgpu::PresentMode,
    /// Clear color.
    pub clear_color: wgpu::Color,
    /// Distance fog.
    pub fog: FogSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            present_mode: wgpu::PresentMode::AutoVsync,
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.3,
                b: 0.4,
                a: 1.0,
            },
            fog: FogSettings::default(),
        }
    }
}

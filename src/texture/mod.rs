//! # Texture Module
//!
//! 2D textures and sampler settings, including the procedural cloud sprite.

mod texture2d;
mod sampler;

pub use texture2d::{radial_sprite_pixels, Texture2D};
pub use sampler::{AddressMode, FilterMode, SamplerSettings};

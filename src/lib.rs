//! # Cumulus - Billboard Cloud Particle Demo
//!
//! Cumulus renders a drifting particle cloud as alpha-blended billboards
//! through a wgpu rasterization pipeline. Particles live on the CPU in a
//! fixed-size store; every frame they are aged, respawned, integrated,
//! sorted back-to-front from the camera, and drawn one quad at a time.
//!
//! ## Features
//!
//! - **Math**: self-contained vectors, matrices, and colors
//! - **Core**: wgpu context, billboard renderer, frame clock
//! - **Particles**: cloud distribution sampling, simulation, depth sorting
//! - **Camera**: perspective camera with WASD fly controls
//! - **Texture**: procedural radial cloud sprite
//!
//! ## Example
//!
//! ```ignore
//! use cumulus::prelude::*;
//!
//! let mut sampler = EntropySampler::new();
//! let mut store = ParticleStore::generate(1000, CloudDistribution::default(), &mut sampler)?;
//! let simulator = Simulator::new(SimulationBounds::default());
//!
//! // each frame:
//! simulator.update(&mut store, &mut sampler, delta_time);
//! sort_back_to_front(store.particles_mut(), camera.position);
//! engine.render(&mut camera, store.particles())?;
//! ```

pub mod math;
pub mod core;
pub mod camera;
pub mod controls;
pub mod particles;
pub mod texture;
pub mod geometry;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::math::*;
    pub use crate::core::*;
    pub use crate::camera::*;
    pub use crate::controls::*;
    pub use crate::particles::*;
    pub use crate::texture::*;
    pub use crate::geometry::*;
}

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const NAME: &str = "Cumulus";

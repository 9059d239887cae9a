//! # Camera Module
//!
//! Perspective camera with cached view/projection matrices.

mod perspective;

pub use perspective::PerspectiveCamera;

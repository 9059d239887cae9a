//! # Geometry Module
//!
//! Vertex types and the shared billboard quad.

mod vertex;

pub use vertex::{unit_quad, PositionVertex};

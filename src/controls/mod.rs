//! # Controls Module
//!
//! Keyboard-driven camera movement.

mod fly;

pub use fly::{FlyControls, MoveKey};

//! Interpolation and color helpers

pub mod color;
pub mod lerp;

pub use color::Color;
pub use lerp::{Lerp, smoothstep};

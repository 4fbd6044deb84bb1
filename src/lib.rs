//! Memories - a camera-driven transition between a procedural city and
//! terraced particle hills

pub mod core;
pub mod math;
pub mod generation;
pub mod transition;
pub mod instancing;
pub mod scene;

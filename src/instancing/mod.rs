//! Instance placement: turns generated records plus the frame's
//! [`BlendSnapshot`](crate::transition::BlendSnapshot) into instanced draw
//! batches.
//!
//! Hill instances are written once after generation; only their group
//! transform changes per frame. City tiles and dust are rewritten every frame.

pub mod batch;
pub mod city;
pub mod dust;
pub mod hills;
pub mod raw;

pub use batch::{InstanceBatch, LineBatch};
pub use city::{CityInstances, CityPalette, flicker};
pub use dust::{DustInstances, DustStyle};
pub use hills::{HillInstances, HillStyle};
pub use raw::{InstanceRaw, InstanceTransform};

//! Scene composition

pub mod config;
pub mod lights;
pub mod manager;

pub use config::{CameraConfig, DEFAULT_HILLS, FloorConfig, HillPlacement, SceneConfig};
pub use lights::{DirectionalLight, LightRig, PointLight};
pub use manager::{DrawStats, Scene, generate_hills};

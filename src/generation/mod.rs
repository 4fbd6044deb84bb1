//! Procedural content: seeded terraced hills plus the unseeded city grid
//! and dust scatter.

pub mod city;
pub mod config;
pub mod dust;
pub mod hills;
pub mod rng;

pub use city::{CityTile, TileKind, generate_city};
pub use config::{CityGridConfig, ContourNoiseConfig, DustConfig, HillGenConfig};
pub use dust::{DustMote, generate_dust};
pub use hills::{ContourLine, HillCluster, HillParams, ParticleRecord, TerraceLayer, TerracedHillGenerator};
pub use rng::SeededRng;

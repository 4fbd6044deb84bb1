//! Floating dust motes that populate the city.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::DustConfig;

/// A single mote; its drift is a function of elapsed time and `phase`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DustMote {
    pub base_position: Vec3,
    pub phase: f32,
}

/// Scatter motes uniformly through the spawn box
pub fn generate_dust<R: Rng + ?Sized>(config: &DustConfig, rng: &mut R) -> Vec<DustMote> {
    (0..config.count)
        .map(|_| {
            let x = (rng.r#gen::<f32>() - 0.5) * config.extent;
            let y = rng.gen_range(config.height[0]..config.height[1]);
            let z = (rng.r#gen::<f32>() - 0.5) * config.extent;
            DustMote {
                base_position: Vec3::new(x, y, z),
                phase: rng.r#gen::<f32>() * TAU,
            }
        })
        .collect()
}

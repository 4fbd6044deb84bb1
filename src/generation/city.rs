//! City tile grid: a jittered square grid of boxes around the origin.
//!
//! Tiles are scattered once with unseeded randomness; only their rendered
//! transform changes afterwards (see `instancing::city`).

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::CityGridConfig;

/// Surface category of a tile, mapped to a palette color at draw time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Dark,
    Grey,
    White,
}

/// One city tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityTile {
    /// Centre of the tile before dispersal
    pub initial_position: Vec3,
    /// Width, height, depth
    pub scale: Vec3,
    pub kind: TileKind,
    /// Lit window; flickers instead of using its kind's color
    pub emissive: bool,
    /// Outward dispersal direction in the XZ plane
    pub direction: Vec3,
}

/// Scatter the city grid
pub fn generate_city<R: Rng + ?Sized>(config: &CityGridConfig, rng: &mut R) -> Vec<CityTile> {
    let n = config.grid_size;
    let offset = n as f32 * config.gap / 2.0;
    let mut tiles = Vec::with_capacity((n * n) as usize);

    for x in 0..n {
        for z in 0..n {
            let px = x as f32 * config.gap - offset + (rng.r#gen::<f32>() - 0.5) * config.jitter;
            let pz = z as f32 * config.gap - offset + (rng.r#gen::<f32>() - 0.5) * config.jitter;

            // Keep a small clearing around the focal axis
            if (px * px + pz * pz).sqrt() < config.clear_radius {
                continue;
            }

            let u: f32 = rng.r#gen();
            let height = config.min_height + u * u * config.height_range;

            let kind_roll: f32 = rng.r#gen();
            let kind = if kind_roll > config.white_threshold {
                TileKind::White
            } else if kind_roll > config.grey_threshold {
                TileKind::Grey
            } else {
                TileKind::Dark
            };

            let [min_fp, max_fp] = config.footprint;
            let width = rng.gen_range(min_fp..max_fp);
            let depth = rng.gen_range(min_fp..max_fp);

            tiles.push(CityTile {
                initial_position: Vec3::new(px, height / 2.0 + config.base_y, pz),
                scale: Vec3::new(width, height, depth),
                kind,
                emissive: kind_roll > config.emissive_threshold,
                direction: Vec3::new(px, 0.0, pz).normalize_or_zero() * config.spread_direction_length,
            });
        }
    }

    log::debug!("Generated city grid: {} tiles ({} emissive)", tiles.len(), tiles.iter().filter(|t| t.emissive).count());
    tiles
}

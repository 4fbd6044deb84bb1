//! City tile placement, rewritten every frame.
//!
//! Tiles part outward along their direction vectors as the camera closes in
//! and shrink to nothing; lit tiles flicker out of phase with each other.

use glam::Quat;
use serde::{Deserialize, Serialize};

use super::batch::InstanceBatch;
use super::raw::{InstanceRaw, InstanceTransform};
use crate::generation::{CityTile, TileKind};
use crate::math::Color;
use crate::transition::BlendSnapshot;

/// Tile colors
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CityPalette {
    pub dark: Color,
    pub grey: Color,
    pub white: Color,
    /// Warm window light of emissive tiles
    pub light: Color,
}

impl Default for CityPalette {
    fn default() -> Self {
        Self {
            dark: Color::from_hex(0x0a0a0a),
            grey: Color::from_hex(0x333333),
            white: Color::from_hex(0xe0e0e0),
            light: Color::from_hex(0xfffeb0),
        }
    }
}

impl CityPalette {
    pub fn color_of(&self, kind: TileKind) -> Color {
        match kind {
            TileKind::Dark => self.dark,
            TileKind::Grey => self.grey,
            TileKind::White => self.white,
        }
    }
}

/// Brightness multiplier for an emissive tile at `time_ms`.
///
/// Keyed by instance index so neighbours are out of phase. Evaluated in f64
/// because millisecond clocks outgrow f32 precision within minutes.
pub fn flicker(time_ms: f64, index: usize) -> f32 {
    (1.0 + (time_ms * 0.005 + index as f64).sin() * 0.2) as f32
}

/// Draw batch for the whole city grid
#[derive(Clone, Debug)]
pub struct CityInstances {
    tiles: Vec<CityTile>,
    palette: CityPalette,
    pub batch: InstanceBatch,
}

impl CityInstances {
    pub fn new(tiles: Vec<CityTile>, palette: CityPalette) -> Self {
        let mut batch = InstanceBatch::with_capacity("city_tiles", tiles.len());
        for tile in &tiles {
            let transform = InstanceTransform::new(tile.initial_position, Quat::IDENTITY, tile.scale);
            batch.push(InstanceRaw::new(&transform, palette.color_of(tile.kind).with_alpha(1.0)));
        }
        Self { tiles, palette, batch }
    }

    pub fn tiles(&self) -> &[CityTile] {
        &self.tiles
    }

    /// Transform and color of tile `index` for this frame
    pub fn instance_for(&self, index: usize, snapshot: &BlendSnapshot, time_ms: f64) -> Option<InstanceRaw> {
        let tile = self.tiles.get(index)?;
        let position = tile.initial_position + tile.direction * snapshot.city_spread;
        let transform = InstanceTransform::new(position, Quat::IDENTITY, tile.scale * snapshot.city_fade);
        let color = if tile.emissive {
            self.palette.light.scaled(flicker(time_ms, index))
        } else {
            self.palette.color_of(tile.kind)
        };
        Some(InstanceRaw::new(&transform, color.with_alpha(1.0)))
    }

    /// Per-frame rewrite of every tile
    pub fn update(&mut self, snapshot: &BlendSnapshot, time_ms: f64) {
        for index in 0..self.tiles.len() {
            if let Some(raw) = self.instance_for(index, snapshot, time_ms) {
                self.batch.set(index, raw);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{CityGridConfig, generate_city};
    use crate::transition::TransitionController;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn city() -> CityInstances {
        let tiles = generate_city(&CityGridConfig::default(), &mut StdRng::seed_from_u64(42));
        CityInstances::new(tiles, CityPalette::default())
    }

    #[test]
    fn test_flicker_range_and_phase() {
        for i in 0..50 {
            let f = flicker(1_700_000_000_000.0, i);
            assert!((0.8..=1.2).contains(&f));
        }
        assert_ne!(flicker(0.0, 0), flicker(0.0, 1));
        assert_eq!(flicker(0.0, 0), 1.0);
    }

    #[test]
    fn test_full_city_sits_at_rest() {
        let controller = TransitionController::default();
        let mut city = city();
        let snapshot = controller.snapshot(70.0);
        city.update(&snapshot, 0.0);

        for (raw, tile) in city.batch.instances().iter().zip(city.tiles()) {
            assert!((raw.position() - tile.initial_position).length() < 1e-5);
            let (scale, _, _) = raw.model_matrix().to_scale_rotation_translation();
            assert!((scale - tile.scale).length() < 1e-4);
        }
    }

    #[test]
    fn test_city_collapses_and_disperses_near_hills() {
        let controller = TransitionController::default();
        let mut city = city();
        let snapshot = controller.snapshot(10.0);
        city.update(&snapshot, 0.0);

        for (raw, tile) in city.batch.instances().iter().zip(city.tiles()) {
            // Pushed 80 units along a 1.5-unit direction
            let moved = raw.position() - tile.initial_position;
            assert!((moved.length() - 120.0).abs() < 1e-2);
            assert_eq!(raw.model[0][0], 0.0);
            assert_eq!(raw.model[1][1], 0.0);
        }
    }

    #[test]
    fn test_midpoint_dispersal() {
        let controller = TransitionController::default();
        let mut city = city();
        let snapshot = controller.snapshot(40.0);
        city.update(&snapshot, 0.0);
        let tile = city.tiles()[0];
        let raw = city.batch.instances()[0];
        let expected = tile.initial_position + tile.direction * 20.0;
        assert!((raw.position() - expected).length() < 1e-3);
    }

    #[test]
    fn test_emissive_tiles_flicker_others_keep_color() {
        let controller = TransitionController::default();
        let mut city = city();
        let palette = CityPalette::default();
        let snapshot = controller.snapshot(70.0);
        let time_ms = 12_345.0;
        city.update(&snapshot, time_ms);

        for (i, (raw, tile)) in city.batch.instances().iter().zip(city.tiles()).enumerate() {
            let expected = if tile.emissive {
                palette.light.scaled(flicker(time_ms, i))
            } else {
                palette.color_of(tile.kind)
            };
            assert_eq!(raw.color, expected.with_alpha(1.0));
        }
    }

    #[test]
    fn test_every_frame_rewrites_batch() {
        let controller = TransitionController::default();
        let mut city = city();
        city.batch.take_dirty();
        city.update(&controller.snapshot(50.0), 16.0);
        assert!(city.batch.take_dirty());
        assert_eq!(city.batch.len(), city.tiles().len());
    }
}

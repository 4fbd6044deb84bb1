//! Scene configuration
//!
//! Every section has compile-time defaults that reproduce the stock scene. A
//! JSON file only needs to name the values it changes.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lights::LightRig;
use crate::core::camera_controller::OrbitConfig;
use crate::core::{Error, Result};
use crate::generation::{CityGridConfig, DustConfig, HillGenConfig, HillParams};
use crate::instancing::{CityPalette, DustStyle, HillStyle};
use crate::math::Color;
use crate::transition::{EnvironmentConfig, TransitionConfig};

/// Where one hill cluster stands and how it is generated
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HillPlacement {
    pub position: Vec3,
    pub scale: f32,
    pub height: f32,
    pub seed: i32,
}

impl HillPlacement {
    pub const fn new(position: Vec3, scale: f32, height: f32, seed: i32) -> Self {
        Self { position, scale, height, seed }
    }

    pub fn params(&self) -> HillParams {
        HillParams {
            scale: self.scale,
            height: self.height,
            seed: self.seed,
        }
    }
}

/// The stock hill layout: a loose cluster near the focal origin with two
/// distant hills for depth
pub const DEFAULT_HILLS: [HillPlacement; 7] = [
    HillPlacement::new(Vec3::new(-5.0, -12.0, 10.0), 16.0, 11.0, 10),
    HillPlacement::new(Vec3::new(8.0, -10.0, 2.0), 14.0, 9.0, 23),
    HillPlacement::new(Vec3::new(0.0, -14.0, -8.0), 18.0, 13.0, 33),
    HillPlacement::new(Vec3::new(15.0, -16.0, -15.0), 20.0, 14.0, 44),
    HillPlacement::new(Vec3::new(-15.0, -15.0, -5.0), 15.0, 10.0, 55),
    HillPlacement::new(Vec3::new(-25.0, -20.0, 20.0), 25.0, 15.0, 66),
    HillPlacement::new(Vec3::new(20.0, -20.0, 25.0), 22.0, 14.0, 77),
];

/// Ground plane under the hills
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub height: f32,
    pub size: f32,
    pub color: Color,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            height: -12.0,
            size: 200.0,
            color: Color::WHITE,
        }
    }
}

/// Initial camera placement
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 60.0),
            fov_degrees: 45.0,
        }
    }
}

/// Full scene configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub hills: Vec<HillPlacement>,
    pub hill_generation: HillGenConfig,
    pub hill_style: HillStyle,
    pub city: CityGridConfig,
    pub city_palette: CityPalette,
    pub dust: DustConfig,
    pub dust_style: DustStyle,
    pub transition: TransitionConfig,
    pub environment: EnvironmentConfig,
    pub floor: FloorConfig,
    pub lights: LightRig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hills: DEFAULT_HILLS.to_vec(),
            hill_generation: HillGenConfig::default(),
            hill_style: HillStyle::default(),
            city: CityGridConfig::default(),
            city_palette: CityPalette::default(),
            dust: DustConfig::default(),
            dust_style: DustStyle::default(),
            transition: TransitionConfig::default(),
            environment: EnvironmentConfig::default(),
            floor: FloorConfig::default(),
            lights: LightRig::default(),
            camera: CameraConfig::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Check invariants the generators and the transition rely on
    pub fn validate(&self) -> Result<()> {
        self.hill_generation.validate()?;
        self.city.validate()?;
        self.dust.validate()?;
        self.transition.validate()?;

        if !(self.orbit.min_distance > 0.0 && self.orbit.min_distance <= self.orbit.max_distance) {
            return Err(Error::Config(format!(
                "orbit distances must satisfy 0 < min <= max, got min={} max={}",
                self.orbit.min_distance, self.orbit.max_distance
            )));
        }
        if let Some(h) = self.hills.iter().find(|h| !(h.scale > 0.0 && h.height > 0.0)) {
            return Err(Error::Config(format!(
                "hill seed {} needs positive scale and height, got scale={} height={}",
                h.seed, h.scale, h.height
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON config
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        if let Err(e) = config.validate() {
            log::warn!("Rejected scene config {}: {}", path.display(), e);
            return Err(e);
        }
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

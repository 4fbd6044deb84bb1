//! Generation parameters for hills, the city grid and dust.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Shape of the per-sample terrace boundary radius.
///
/// `r_base(θ) = 1 + sin(θ·primary_frequency + u·phase_jitter)·primary_amplitude
///            + cos(θ·f₂)·a₂`, with `f₂` and `a₂` drawn once per cluster from
/// the secondary ranges.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourNoiseConfig {
    pub primary_frequency: f32,
    pub primary_amplitude: f32,
    /// Scale of the random phase drawn for every angular sample
    pub phase_jitter: f32,
    /// `[min, max)` for the per-cluster secondary frequency
    pub secondary_frequency: [f32; 2],
    /// `[min, max)` for the per-cluster secondary amplitude
    pub secondary_amplitude: [f32; 2],
}

impl Default for ContourNoiseConfig {
    fn default() -> Self {
        Self {
            primary_frequency: 3.0,
            primary_amplitude: 0.1,
            phase_jitter: 10.0,
            secondary_frequency: [3.0, 6.0],
            secondary_amplitude: [0.15, 0.35],
        }
    }
}

/// Terraced hill generation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HillGenConfig {
    /// Horizontal terrace count
    pub layers: u32,
    /// Angular samples per revolution
    pub segments: u32,
    /// Particles per unit area of terrace annulus
    pub density: f32,
    /// Power-law exponent of the radius falloff with height
    pub slope_exponent: f32,
    /// Generation stops at the first layer whose scale drops below this
    pub min_layer_scale: f32,
    /// Number of bottom layers whose outer edge is faded
    pub edge_fade_layers: u32,
    /// Width of the faded band inside the outer edge
    pub edge_fade_width: f32,
    /// Particle scale is drawn from `[min, max)`
    pub particle_scale: [f32; 2],
    /// Upper bound of the random vertical offset
    pub particle_max_offset: f32,
    /// Trees only grow on layers above this fraction of the layer count
    pub tree_height_fraction: f32,
    /// Chance that an eligible layer gets a tree
    pub tree_probability: f32,
    /// Tree scale is drawn from `[min, max)`
    pub tree_scale: [f32; 2],
    pub contour: ContourNoiseConfig,
}

impl Default for HillGenConfig {
    fn default() -> Self {
        Self {
            layers: 24,
            segments: 90,
            density: 15.0,
            slope_exponent: 1.2,
            min_layer_scale: 0.1,
            edge_fade_layers: 3,
            edge_fade_width: 1.0,
            particle_scale: [0.12, 0.27],
            particle_max_offset: 0.08,
            tree_height_fraction: 0.6,
            tree_probability: 0.15,
            tree_scale: [0.5, 1.1],
            contour: ContourNoiseConfig::default(),
        }
    }
}

impl HillGenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.layers == 0 {
            return Err(Error::Config("hill layers must be at least 1".into()));
        }
        if self.segments < 3 {
            return Err(Error::Config(format!(
                "hill segments must be at least 3, got {}",
                self.segments
            )));
        }
        if !(self.density > 0.0) {
            return Err(Error::Config(format!("hill density must be positive, got {}", self.density)));
        }
        if !(self.min_layer_scale > 0.0) {
            return Err(Error::Config(format!(
                "min layer scale must be positive, got {}",
                self.min_layer_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.tree_probability) {
            return Err(Error::Config(format!(
                "tree probability must be within [0, 1], got {}",
                self.tree_probability
            )));
        }
        Ok(())
    }
}

/// City tile grid parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CityGridConfig {
    /// Cells per side
    pub grid_size: u32,
    /// Spacing between cell centres
    pub gap: f32,
    /// Total positional jitter per axis (±half)
    pub jitter: f32,
    /// Cells closer than this to the vertical axis stay empty
    pub clear_radius: f32,
    /// Tile height is `min + u² · range`
    pub min_height: f32,
    pub height_range: f32,
    /// Tiles sit with their base at this height
    pub base_y: f32,
    /// Footprint is drawn from `[min, max)` per axis
    pub footprint: [f32; 2],
    /// Kind draw above this is a white tile
    pub white_threshold: f32,
    /// Kind draw above this (and not white) is a grey tile
    pub grey_threshold: f32,
    /// Kind draw above this is an emissive house
    pub emissive_threshold: f32,
    /// Length of the outward dispersal direction
    pub spread_direction_length: f32,
}

impl Default for CityGridConfig {
    fn default() -> Self {
        Self {
            grid_size: 24,
            gap: 2.5,
            jitter: 0.8,
            clear_radius: 2.0,
            min_height: 0.5,
            height_range: 4.0,
            base_y: -2.0,
            footprint: [0.8, 1.3],
            white_threshold: 0.85,
            grey_threshold: 0.6,
            emissive_threshold: 0.95,
            spread_direction_length: 1.5,
        }
    }
}

impl CityGridConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.gap > 0.0) {
            return Err(Error::Config(format!("city gap must be positive, got {}", self.gap)));
        }
        let [min_fp, max_fp] = self.footprint;
        if !(min_fp.is_finite() && max_fp.is_finite() && min_fp < max_fp) {
            return Err(Error::Config(format!(
                "city footprint must satisfy min < max, got [{}, {}]",
                min_fp, max_fp
            )));
        }
        Ok(())
    }
}

/// Floating dust parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub count: u32,
    /// Horizontal extent of the spawn box (centred on the origin)
    pub extent: f32,
    /// Spawn heights are drawn from `[min, max)`
    pub height: [f32; 2],
    /// Amplitude of the vertical bob
    pub bob_amplitude: f32,
    /// Angular speed of the bob (radians per second)
    pub bob_speed: f32,
    /// Tumble speed around X and Y (radians per second)
    pub spin_speed: f32,
    /// Mote scale at full city blend
    pub max_scale: f32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: 400,
            extent: 80.0,
            height: [-5.0, 25.0],
            bob_amplitude: 2.0,
            bob_speed: 0.5,
            spin_speed: 0.1,
            max_scale: 0.2,
        }
    }
}

impl DustConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.extent.is_finite() {
            return Err(Error::Config(format!("dust extent must be finite, got {}", self.extent)));
        }
        let [low, high] = self.height;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(Error::Config(format!(
                "dust height must satisfy min < max, got [{}, {}]",
                low, high
            )));
        }
        Ok(())
    }
}

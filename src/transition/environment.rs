//! Background and fog state, rewritten once per frame from a snapshot.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::BlendSnapshot;
use crate::math::Color;

/// Linear fog distances
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FogRange {
    pub near: f32,
    pub far: f32,
}

/// Endpoints of the background/fog blend
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub hill_background: Color,
    pub city_background: Color,
    pub hill_fog_color: Color,
    pub city_fog_color: Color,
    /// Tighter fog among the hills for a misty look
    pub hill_fog: FogRange,
    pub city_fog: FogRange,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            hill_background: Color::from_hex(0xffffff),
            city_background: Color::from_hex(0x050505),
            hill_fog_color: Color::from_hex(0xffffff),
            city_fog_color: Color::from_hex(0x000000),
            hill_fog: FogRange { near: 5.0, far: 55.0 },
            city_fog: FogRange { near: 10.0, far: 80.0 },
        }
    }
}

/// Scene-wide clear color, fog and floor state.
///
/// Owned by the scene and written by exactly one caller per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    pub background: Color,
    pub fog_color: Color,
    pub fog_near: f32,
    pub fog_far: f32,
    pub floor_opacity: f32,
}

impl Environment {
    /// Start in the city state, where the camera begins
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            background: config.city_background,
            fog_color: config.city_fog_color,
            fog_near: config.city_fog.near,
            fog_far: config.city_fog.far,
            floor_opacity: 0.0,
        }
    }

    /// Overwrite with this frame's values
    pub fn apply(&mut self, snapshot: &BlendSnapshot) {
        self.background = snapshot.background;
        self.fog_color = snapshot.fog_color;
        self.fog_near = snapshot.fog_near;
        self.fog_far = snapshot.fog_far;
        self.floor_opacity = snapshot.floor_opacity;
    }

    /// The floor is skipped entirely once fully transparent
    pub fn floor_visible(&self) -> bool {
        self.floor_opacity > 0.0
    }

    /// Fog factor at `distance` from the eye: 0 = clear, 1 = fully fogged
    pub fn fog_factor(&self, distance: f32) -> f32 {
        ((distance - self.fog_near) / (self.fog_far - self.fog_near)).clamp(0.0, 1.0)
    }

    pub fn uniform(&self) -> EnvironmentUniform {
        EnvironmentUniform {
            background: self.background.to_array(),
            floor_opacity: self.floor_opacity,
            fog_color: self.fog_color.to_array(),
            _pad0: 0.0,
            fog_near: self.fog_near,
            fog_far: self.fog_far,
            _pad1: [0.0; 2],
        }
    }
}

/// GPU-ready environment uniform.
///
/// `vec3` fields are padded to 16-byte alignment for WGSL compatibility.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct EnvironmentUniform {
    pub background: [f32; 3],
    pub floor_opacity: f32,
    pub fog_color: [f32; 3],
    pub _pad0: f32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub _pad1: [f32; 2],
}

//! Static light rig shared by both worlds.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Color;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Light has no effect past this distance
    pub range: f32,
    pub decay: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Position the light shines from, towards the origin
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub cast_shadows: bool,
    pub shadow_map_size: u32,
}

impl DirectionalLight {
    /// Unit vector the light travels along
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

/// Ambient fill, a cool point light over the city and a warm sun that
/// side-lights the terraces
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LightRig {
    pub ambient_intensity: f32,
    pub city_light: PointLight,
    pub sun: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.4,
            city_light: PointLight {
                position: Vec3::new(0.0, 20.0, 0.0),
                color: Color::from_hex(0x8888ff),
                intensity: 1.5,
                range: 100.0,
                decay: 2.0,
            },
            sun: DirectionalLight {
                position: Vec3::new(-50.0, 40.0, -20.0),
                color: Color::from_hex(0xfff5e0),
                intensity: 2.0,
                cast_shadows: true,
                shadow_map_size: 2048,
            },
        }
    }
}

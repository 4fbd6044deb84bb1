//! Dust motes: bob, tumble and shrink away as the city fades out.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::batch::InstanceBatch;
use super::raw::{InstanceRaw, InstanceTransform};
use crate::generation::{DustConfig, DustMote};
use crate::math::Color;
use crate::transition::BlendSnapshot;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DustStyle {
    pub color: Color,
    pub opacity: f32,
}

impl Default for DustStyle {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffdd40),
            opacity: 0.6,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DustInstances {
    motes: Vec<DustMote>,
    config: DustConfig,
    color: [f32; 4],
    pub batch: InstanceBatch,
}

impl DustInstances {
    pub fn new(motes: Vec<DustMote>, config: DustConfig, style: &DustStyle) -> Self {
        let color = style.color.with_alpha(style.opacity);
        let mut batch = InstanceBatch::with_capacity("dust", motes.len());
        for mote in &motes {
            let transform = InstanceTransform::new(mote.base_position, Quat::IDENTITY, Vec3::ZERO);
            batch.push(InstanceRaw::new(&transform, color));
        }
        batch.set_visible(false);
        Self { motes, config, color, batch }
    }

    pub fn motes(&self) -> &[DustMote] {
        &self.motes
    }

    /// Per-frame drift. Hidden dust is left untouched.
    pub fn update(&mut self, snapshot: &BlendSnapshot, elapsed_secs: f32) {
        self.batch.set_visible(snapshot.dust_visible);
        if !snapshot.dust_visible {
            return;
        }

        let cfg = &self.config;
        let spin = elapsed_secs * cfg.spin_speed;
        let rotation = Quat::from_euler(EulerRot::XYZ, spin, spin, 0.0);
        let scale = Vec3::splat(cfg.max_scale * snapshot.t);

        for (index, mote) in self.motes.iter().enumerate() {
            let bob = (elapsed_secs * cfg.bob_speed + mote.phase).sin() * cfg.bob_amplitude;
            let position = mote.base_position + Vec3::new(0.0, bob, 0.0);
            let transform = InstanceTransform::new(position, rotation, scale);
            self.batch.set(index, InstanceRaw::new(&transform, self.color));
        }
    }
}

//! Distance-driven transition between the hill world and the city world.
//!
//! Every frame the camera's distance from the origin is mapped to a blend
//! factor `t` (0 = hills, 1 = city). [`TransitionController::snapshot`] derives
//! every cross-faded quantity from `t` in one place and returns them by value
//! as a [`BlendSnapshot`]; consumers never read `t` from shared state.

pub mod environment;

pub use environment::{Environment, EnvironmentConfig, EnvironmentUniform, FogRange};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::math::{Color, Lerp, smoothstep};

/// Transition band and the shape of each derived curve
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Camera distance at which the hills are fully shown (`t = 0`)
    pub near: f32,
    /// Camera distance at which the city is fully shown (`t = 1`)
    pub far: f32,
    /// Hills are fully gone once `t` reaches this value
    pub hill_cutoff: f32,
    /// Hills below this eased visibility are not drawn at all
    pub visibility_epsilon: f32,
    /// Outward city displacement at `t = 0`
    pub city_spread: f32,
    /// City tiles reach full size at `t = 1 / city_fade_rate`
    pub city_fade_rate: f32,
    /// Dust is hidden at or below this `t`
    pub dust_threshold: f32,
    /// Hill floor reaches zero opacity at `t = 1 / floor_fade_rate`
    pub floor_fade_rate: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            near: 10.0,
            far: 70.0,
            hill_cutoff: 0.4,
            visibility_epsilon: 0.01,
            city_spread: 80.0,
            city_fade_rate: 1.5,
            dust_threshold: 0.01,
            floor_fade_rate: 2.0,
        }
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.near.is_finite() && self.far.is_finite() && self.near < self.far) {
            return Err(Error::Config(format!(
                "transition band must satisfy near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.hill_cutoff > 0.0 && self.hill_cutoff <= 1.0) {
            return Err(Error::Config(format!("hill cutoff must be within (0, 1], got {}", self.hill_cutoff)));
        }
        Ok(())
    }

    /// Normalized blend factor for a camera distance, clamped to `[0, 1]`
    pub fn blend(&self, distance: f32) -> f32 {
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }

    /// Linear hill presence: 1 at `t = 0`, exactly 0 from `hill_cutoff` on
    pub fn hill_presence(&self, t: f32) -> f32 {
        ((self.hill_cutoff - t) / self.hill_cutoff).clamp(0.0, 1.0)
    }

    /// Eased hill visibility, used as the hill groups' uniform scale
    pub fn hill_visibility(&self, t: f32) -> f32 {
        smoothstep(self.hill_presence(t))
    }

    /// Outward displacement of city tiles along their direction vectors
    pub fn city_spread(&self, t: f32) -> f32 {
        let inv = 1.0 - t;
        inv * inv * self.city_spread
    }

    /// Uniform scale factor of city tiles
    pub fn city_fade(&self, t: f32) -> f32 {
        (t * self.city_fade_rate).clamp(0.0, 1.0)
    }

    /// Opacity of the ground plane under the hills
    pub fn floor_opacity(&self, t: f32) -> f32 {
        (1.0 - t * self.floor_fade_rate).max(0.0)
    }
}

/// Everything derived from one frame's camera distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendSnapshot {
    pub distance: f32,
    pub t: f32,
    /// Linear hill presence before easing
    pub hill_presence: f32,
    /// Eased hill visibility (uniform scale of every hill group)
    pub hill_visibility: f32,
    /// Whether hill batches are submitted at all
    pub hills_visible: bool,
    pub city_spread: f32,
    pub city_fade: f32,
    pub dust_visible: bool,
    pub background: Color,
    pub fog_color: Color,
    pub fog_near: f32,
    pub fog_far: f32,
    pub floor_opacity: f32,
}

/// Maps camera distance to a [`BlendSnapshot`]. Owns no per-frame state.
#[derive(Clone, Debug, Default)]
pub struct TransitionController {
    transition: TransitionConfig,
    environment: EnvironmentConfig,
}

impl TransitionController {
    pub fn new(transition: TransitionConfig, environment: EnvironmentConfig) -> Self {
        Self { transition, environment }
    }

    pub fn transition(&self) -> &TransitionConfig {
        &self.transition
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    /// Compute this frame's snapshot. Call every frame; nothing is cached.
    pub fn snapshot(&self, distance: f32) -> BlendSnapshot {
        let cfg = &self.transition;
        let env = &self.environment;
        let t = cfg.blend(distance);
        let hill_visibility = cfg.hill_visibility(t);

        BlendSnapshot {
            distance,
            t,
            hill_presence: cfg.hill_presence(t),
            hill_visibility,
            hills_visible: hill_visibility > cfg.visibility_epsilon,
            city_spread: cfg.city_spread(t),
            city_fade: cfg.city_fade(t),
            dust_visible: t > cfg.dust_threshold,
            background: env.hill_background.lerp(&env.city_background, t),
            fog_color: env.hill_fog_color.lerp(&env.city_fog_color, t),
            fog_near: Lerp::lerp(&env.hill_fog.near, &env.city_fog.near, t),
            fog_far: Lerp::lerp(&env.hill_fog.far, &env.city_fog.far, t),
            floor_opacity: cfg.floor_opacity(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> TransitionController {
        TransitionController::default()
    }

    #[test]
    fn test_blend_endpoints_and_clamping() {
        let cfg = TransitionConfig::default();
        assert_eq!(cfg.blend(10.0), 0.0);
        assert_eq!(cfg.blend(70.0), 1.0);
        assert_eq!(cfg.blend(0.0), 0.0);
        assert_eq!(cfg.blend(-50.0), 0.0);
        assert_eq!(cfg.blend(500.0), 1.0);
        assert!((cfg.blend(40.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_blend_is_monotonic() {
        let cfg = TransitionConfig::default();
        let mut previous = cfg.blend(-10.0);
        for step in 0..=1000 {
            let d = -10.0 + step as f32 * 0.1;
            let t = cfg.blend(d);
            assert!(t >= previous, "blend decreased at distance {d}");
            previous = t;
        }
    }

    #[test]
    fn test_default_band_is_valid() {
        assert!(TransitionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_band_is_rejected() {
        let equal = TransitionConfig { near: 40.0, far: 40.0, ..Default::default() };
        assert!(equal.validate().is_err());
        let inverted = TransitionConfig { near: 70.0, far: 10.0, ..Default::default() };
        assert!(inverted.validate().is_err());
        let nan = TransitionConfig { far: f32::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_snapshot_at_hill_end() {
        let s = controller().snapshot(10.0);
        assert_eq!(s.t, 0.0);
        assert_eq!(s.hill_presence, 1.0);
        assert_eq!(s.hill_visibility, 1.0);
        assert!(s.hills_visible);
        assert_eq!(s.city_spread, 80.0);
        assert_eq!(s.city_fade, 0.0);
        assert!(!s.dust_visible);
        assert_eq!(s.floor_opacity, 1.0);
        assert_eq!(s.background, Color::WHITE);
        assert_eq!(s.fog_near, 5.0);
        assert_eq!(s.fog_far, 55.0);
    }

    #[test]
    fn test_snapshot_at_city_end() {
        let s = controller().snapshot(70.0);
        assert_eq!(s.t, 1.0);
        assert_eq!(s.hill_visibility, 0.0);
        assert!(!s.hills_visible);
        assert_eq!(s.city_spread, 0.0);
        assert_eq!(s.city_fade, 1.0);
        assert!(s.dust_visible);
        assert_eq!(s.floor_opacity, 0.0);
        let night = Color::from_hex(0x050505);
        assert!((s.background.r - night.r).abs() < 1e-6);
        assert!((s.background.b - night.b).abs() < 1e-6);
        assert_eq!(s.fog_color, Color::BLACK);
        assert_eq!(s.fog_near, 10.0);
        assert_eq!(s.fog_far, 80.0);
    }

    #[test]
    fn test_snapshot_at_midpoint() {
        let s = controller().snapshot(40.0);
        assert!((s.t - 0.5).abs() < 1e-6);
        assert!((s.city_spread - 20.0).abs() < 1e-4);
        assert_eq!(s.city_fade, 0.75);
        assert!((s.fog_near - 7.5).abs() < 1e-5);
        assert!((s.fog_far - 67.5).abs() < 1e-5);
        assert!((s.fog_color.r - 0.5).abs() < 1e-5);
        assert_eq!(s.floor_opacity, 0.0);
        // Hills are already gone halfway through the band
        assert_eq!(s.hill_visibility, 0.0);
    }

    #[test]
    fn test_hill_visibility_cutoff_is_exact() {
        let cfg = TransitionConfig::default();
        assert_eq!(cfg.hill_visibility(0.4), 0.0);
        assert_eq!(cfg.hill_visibility(0.41), 0.0);
        assert_eq!(cfg.hill_visibility(1.0), 0.0);
        assert!(cfg.hill_visibility(0.39) > 0.0);

        // Distance 34 gives t = 0.4
        let s = controller().snapshot(34.0);
        assert_eq!(s.hill_visibility, 0.0);
        assert!(!s.hills_visible);
    }

    #[test]
    fn test_hill_visibility_is_eased_and_monotonic() {
        let cfg = TransitionConfig::default();
        let mut previous = cfg.hill_visibility(0.0);
        for step in 1..=100 {
            let t = step as f32 / 100.0;
            let v = cfg.hill_visibility(t);
            assert!(v <= previous);
            previous = v;
        }
        // Eased: presence 0.5 maps to 0.5, presence 0.25 below linear
        assert!((cfg.hill_visibility(0.2) - 0.5).abs() < 1e-5);
        assert!(cfg.hill_visibility(0.3) < cfg.hill_presence(0.3));
    }

    #[test]
    fn test_visibility_epsilon_hides_nearly_gone_hills() {
        let cfg = TransitionConfig::default();
        // Just inside the cutoff the eased value is tiny but non-zero
        let t = 0.398;
        assert!(cfg.hill_visibility(t) > 0.0);
        let s = controller().snapshot(cfg.near + t * (cfg.far - cfg.near));
        assert!(!s.hills_visible);
    }

    #[test]
    fn test_city_curves() {
        let cfg = TransitionConfig::default();
        assert_eq!(cfg.city_fade(0.5), 0.75);
        assert_eq!(cfg.city_fade(0.9), 1.0);
        assert!((cfg.city_spread(0.75) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_dust_threshold() {
        let cfg = TransitionConfig::default();
        let c = controller();
        assert!(!c.snapshot(cfg.near + 0.005 * (cfg.far - cfg.near)).dust_visible);
        assert!(!c.snapshot(cfg.near).dust_visible);
        assert!(c.snapshot(cfg.near + 0.02 * (cfg.far - cfg.near)).dust_visible);
    }
}

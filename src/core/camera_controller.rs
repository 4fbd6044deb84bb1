//! Orbit camera controller
//!
//! Keeps the camera on a sphere around a target and eases user input in with
//! exponential damping, so camera distance (and with it the transition blend)
//! changes smoothly from frame to frame.

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::types::Vec3;

/// Orbit limits and feel
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    /// Fraction of pending rotation applied per update (0-1]
    pub damping_factor: f32,
    /// Multiplier on rotation input
    pub rotate_speed: f32,
    /// Exponent applied to the per-step zoom ratio
    pub zoom_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
    /// Largest polar angle from +Y (radians); keeps the camera above the ground
    pub max_polar_angle: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            damping_factor: 0.015,
            rotate_speed: 0.4,
            zoom_speed: 0.6,
            min_distance: 2.0,
            max_distance: 90.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2 - 0.05,
        }
    }
}

/// Zoom ratio per wheel step before `zoom_speed` is applied
const ZOOM_STEP: f32 = 0.95;

/// Keeps phi away from the poles where the basis degenerates
const POLE_EPSILON: f32 = 1e-6;

/// Damped orbit controller around [`OrbitConfig::target`]
pub struct OrbitCameraController {
    config: OrbitConfig,
    /// Distance to target
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around Y, measured from +Z towards +X
    theta: f32,
    /// Rotation still to be eased in
    pending_theta: f32,
    pending_phi: f32,
    /// Radius multiplier accumulated since the last update
    pending_scale: f32,
}

impl OrbitCameraController {
    /// Create a controller that starts from the camera's current position
    pub fn new(config: OrbitConfig, camera: &Camera) -> Self {
        let offset = camera.position - config.target;
        let radius = offset.length();
        let (phi, theta) = if radius > 0.0 {
            ((offset.y / radius).clamp(-1.0, 1.0).acos(), offset.x.atan2(offset.z))
        } else {
            (std::f32::consts::FRAC_PI_2, 0.0)
        };

        Self {
            config,
            radius,
            phi,
            theta,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queue a rotation (radians, before `rotate_speed`)
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.pending_theta -= delta_azimuth * self.config.rotate_speed;
        self.pending_phi -= delta_polar * self.config.rotate_speed;
    }

    /// Queue zoom steps; positive steps move towards the target
    pub fn zoom(&mut self, steps: f32) {
        let ratio = ZOOM_STEP.powf(self.config.zoom_speed);
        self.pending_scale *= ratio.powf(steps);
    }

    /// Apply damped input and place the camera on the orbit sphere
    pub fn update(&mut self, camera: &mut Camera) {
        let damping = self.config.damping_factor;

        self.theta += self.pending_theta * damping;
        self.phi += self.pending_phi * damping;
        self.phi = self
            .phi
            .clamp(POLE_EPSILON, self.config.max_polar_angle.min(std::f32::consts::PI - POLE_EPSILON));

        self.radius = (self.radius * self.pending_scale)
            .clamp(self.config.min_distance, self.config.max_distance);
        self.pending_scale = 1.0;

        self.pending_theta *= 1.0 - damping;
        self.pending_phi *= 1.0 - damping;

        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.position = self.config.target + offset;
        camera.face(self.config.target, Vec3::Y);
    }

    /// Current distance to the target
    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }
}

//! Scene camera

use crate::core::types::{Vec3, Quat};

/// Camera placement and field of view
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let mut camera = Self::new(position, fov_y_degrees);
        camera.face(target, Vec3::Y);
        camera
    }

    /// Rotate the camera so it looks at `target`
    pub fn face(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(up).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight along `up`; keep the current orientation
            return;
        }
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));
    }

    /// Distance from the world origin, the focal point of the transition
    pub fn distance_from_origin(&self) -> f32 {
        self.position.length()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 30.0, 60.0), Vec3::ZERO, 45.0)
    }
}

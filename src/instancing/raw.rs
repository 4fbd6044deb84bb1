//! GPU-ready per-instance data.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, rotation and scale of one instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl InstanceTransform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Rotation given as XYZ Euler angles in radians
    pub fn from_euler(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self::new(position, Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z), scale)
    }

    /// Translation * rotation * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// One instance as uploaded to an instance vertex buffer.
///
/// 80 bytes: a column-major model matrix followed by linear RGBA.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(transform: &InstanceTransform, color: [f32; 4]) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            color,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Translation column of the model matrix
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }
}

//! Instanced draw batches and line loops.
//!
//! A batch holds a CPU copy of its instance buffer plus a group transform that
//! is applied on top of every instance. Writes mark the batch dirty; the
//! renderer uploads and calls [`InstanceBatch::take_dirty`].

use std::ops::Range;

use glam::{Mat4, Vec3};

use super::raw::InstanceRaw;

/// Many copies of one base shape, each with its own transform and color
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    label: &'static str,
    instances: Vec<InstanceRaw>,
    group_transform: Mat4,
    visible: bool,
    dirty: bool,
}

impl InstanceBatch {
    pub fn new(label: &'static str) -> Self {
        Self::with_capacity(label, 0)
    }

    pub fn with_capacity(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            instances: Vec::with_capacity(capacity),
            group_transform: Mat4::IDENTITY,
            visible: true,
            dirty: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn push(&mut self, instance: InstanceRaw) {
        self.instances.push(instance);
        self.dirty = true;
    }

    /// Overwrite an instance in place. Out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, instance: InstanceRaw) {
        if let Some(slot) = self.instances.get_mut(index) {
            *slot = instance;
            self.dirty = true;
        }
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn group_transform(&self) -> Mat4 {
        self.group_transform
    }

    /// Uniformly scaled group placed at `origin`
    pub fn set_group(&mut self, origin: Vec3, scale: f32) {
        self.group_transform = Mat4::from_translation(origin) * Mat4::from_scale(Vec3::splat(scale));
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Instances to submit this frame; hidden batches draw nothing
    pub fn draw_count(&self) -> usize {
        if self.visible { self.instances.len() } else { 0 }
    }

    /// World-space matrix of one instance
    pub fn world_matrix(&self, index: usize) -> Option<Mat4> {
        self.instances.get(index).map(|i| self.group_transform * i.model_matrix())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether an upload is needed
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// A set of closed polylines sharing one color and group transform
#[derive(Clone, Debug)]
pub struct LineBatch {
    label: &'static str,
    vertices: Vec<[f32; 3]>,
    loops: Vec<Range<u32>>,
    color: [f32; 4],
    group_transform: Mat4,
    visible: bool,
}

impl LineBatch {
    pub fn new(label: &'static str, color: [f32; 4]) -> Self {
        Self {
            label,
            vertices: Vec::new(),
            loops: Vec::new(),
            color,
            group_transform: Mat4::IDENTITY,
            visible: true,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Append a closed loop; the last point connects back to the first
    pub fn push_loop(&mut self, points: impl IntoIterator<Item = Vec3>) {
        let start = self.vertices.len() as u32;
        self.vertices.extend(points.into_iter().map(|p| p.to_array()));
        let end = self.vertices.len() as u32;
        if end > start {
            self.loops.push(start..end);
        }
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn loops(&self) -> &[Range<u32>] {
        &self.loops
    }

    pub fn loop_vertices(&self, index: usize) -> Option<&[[f32; 3]]> {
        self.loops
            .get(index)
            .map(|r| &self.vertices[r.start as usize..r.end as usize])
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn group_transform(&self) -> Mat4 {
        self.group_transform
    }

    pub fn set_group(&mut self, origin: Vec3, scale: f32) {
        self.group_transform = Mat4::from_translation(origin) * Mat4::from_scale(Vec3::splat(scale));
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Loops to submit this frame
    pub fn draw_count(&self) -> usize {
        if self.visible { self.loops.len() } else { 0 }
    }
}

//! Hill cluster placement: static instance data written once, then a
//! per-frame uniform scale and visibility on the whole group.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::batch::{InstanceBatch, LineBatch};
use super::raw::{InstanceRaw, InstanceTransform};
use crate::generation::HillCluster;
use crate::math::Color;
use crate::transition::BlendSnapshot;

/// Colors and line styling for hill clusters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HillStyle {
    pub foliage: Color,
    pub contour: Color,
    pub contour_opacity: f32,
    /// Contours float slightly above their terrace to avoid z-fighting
    pub contour_lift: f32,
}

impl Default for HillStyle {
    fn default() -> Self {
        Self {
            foliage: Color::from_hex(0x5c7a50),
            contour: Color::from_hex(0xffffff),
            contour_opacity: 0.4,
            contour_lift: 0.05,
        }
    }
}

/// Draw batches for one hill cluster
#[derive(Clone, Debug)]
pub struct HillInstances {
    origin: Vec3,
    pub bushes: InstanceBatch,
    pub trees: InstanceBatch,
    pub contours: LineBatch,
}

impl HillInstances {
    /// Build the batches and write every local instance transform once
    pub fn new(cluster: &HillCluster, style: &HillStyle) -> Self {
        let foliage = style.foliage.with_alpha(1.0);

        let mut bushes = InstanceBatch::with_capacity("hill_bushes", cluster.bushes.len());
        for p in &cluster.bushes {
            let position = p.position + Vec3::new(0.0, p.vertical_offset, 0.0);
            let transform = InstanceTransform::from_euler(position, p.rotation, Vec3::splat(p.scale));
            bushes.push(InstanceRaw::new(&transform, foliage));
        }

        let mut trees = InstanceBatch::with_capacity("hill_trees", cluster.trees.len());
        for tree in &cluster.trees {
            let transform = InstanceTransform::from_euler(tree.position, tree.rotation, Vec3::splat(tree.scale));
            trees.push(InstanceRaw::new(&transform, foliage));
        }

        let mut contours = LineBatch::new("hill_contours", style.contour.with_alpha(style.contour_opacity));
        for line in &cluster.contours {
            let lift = Vec3::new(0.0, line.layer_height + style.contour_lift, 0.0);
            contours.push_loop(line.points.iter().map(|p| *p + lift));
        }

        let mut instances = Self {
            origin: cluster.origin,
            bushes,
            trees,
            contours,
        };
        // Hidden until the first frame says otherwise
        instances.set_group(0.0, false);
        instances
    }

    /// Per-frame: scale every group by the eased visibility and drop hidden
    /// groups from the draw list
    pub fn update(&mut self, snapshot: &BlendSnapshot) {
        self.set_group(snapshot.hill_visibility, snapshot.hills_visible);
    }

    fn set_group(&mut self, scale: f32, visible: bool) {
        self.bushes.set_group(self.origin, scale);
        self.bushes.set_visible(visible);
        self.trees.set_group(self.origin, scale);
        self.trees.set_visible(visible);
        self.contours.set_group(self.origin, scale);
        self.contours.set_visible(visible);
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn visible(&self) -> bool {
        self.bushes.visible()
    }
}

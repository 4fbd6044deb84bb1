//! Terraced hill generation.
//!
//! A hill is a stack of horizontal terraces. Each terrace boundary is a noisy
//! closed curve sampled at a fixed number of angles; the annulus between one
//! terrace boundary and the next (smaller) one is filled with small particles
//! at a constant areal density. Upper terraces occasionally carry a tree, and
//! every terrace except the lowest contributes a contour line.
//!
//! Generation is a pure function of the seed and [`HillParams`]: the noise
//! stream is consumed layer by layer, segment by segment, in a fixed order.

use std::f32::consts::{PI, TAU};
use std::ops::Range;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::HillGenConfig;
use super::rng::SeededRng;

/// Inputs for one hill
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HillParams {
    /// Radius of the bottom terrace before boundary noise
    pub scale: f32,
    /// Total height of the terrace stack
    pub height: f32,
    pub seed: i32,
}

/// One scattered element (bush, tree, dust mote, tower)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub position: Vec3,
    pub scale: f32,
    /// Euler angles (XYZ order, radians)
    pub rotation: Vec3,
    pub vertical_offset: f32,
}

/// Outline of one terrace, in the cluster's local frame at `y = 0`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourLine {
    pub layer_height: f32,
    pub points: Vec<Vec3>,
}

/// Bookkeeping for one generated terrace
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerraceLayer {
    pub index: u32,
    pub height: f32,
    /// Radial scale of this terrace's outer boundary
    pub outer_scale: f32,
    /// Radial scale of the next terrace up, the inner edge of this annulus
    pub inner_scale: f32,
    /// Noisy unit radius per angular sample
    pub radius_base: Vec<f32>,
    /// Indices into [`HillCluster::bushes`]
    pub particles: Range<usize>,
}

impl TerraceLayer {
    /// Inner and outer boundary radius at angular sample `segment`
    pub fn sample_radii(&self, segment: usize) -> Option<(f32, f32)> {
        self.radius_base
            .get(segment)
            .map(|r| (r * self.inner_scale, r * self.outer_scale))
    }

    /// Largest outer radius over all samples
    pub fn max_outer_radius(&self) -> f32 {
        self.radius_base.iter().copied().fold(f32::NEG_INFINITY, f32::max) * self.outer_scale
    }
}

/// A generated hill: its placement, inputs and derived geometry.
///
/// Geometry is in the cluster's local frame; `origin` is applied at draw time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HillCluster {
    pub origin: Vec3,
    pub params: HillParams,
    pub layers: Vec<TerraceLayer>,
    pub bushes: Vec<ParticleRecord>,
    pub trees: Vec<ParticleRecord>,
    pub contours: Vec<ContourLine>,
}

/// Generates [`HillCluster`]s from a fixed [`HillGenConfig`]
#[derive(Clone, Debug, Default)]
pub struct TerracedHillGenerator {
    config: HillGenConfig,
}

impl TerracedHillGenerator {
    pub fn new(config: HillGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HillGenConfig {
        &self.config
    }

    /// Radial scale of terrace `layer`: a power-law taper towards the peak
    pub fn layer_scale(&self, scale: f32, layer: u32) -> f32 {
        let progress = layer as f32 / self.config.layers as f32;
        scale * (1.0 - progress).max(0.0).powf(self.config.slope_exponent)
    }

    /// Scale multiplier for a particle `dist_from_edge` inside the outer
    /// boundary of terrace `layer`.
    ///
    /// Bottom terraces shrink particles linearly to zero at the boundary so the
    /// hill base blends into the ground; everywhere else the multiplier is 1.
    pub fn edge_fade(&self, layer: u32, dist_from_edge: f32) -> f32 {
        let width = self.config.edge_fade_width;
        if layer < self.config.edge_fade_layers && dist_from_edge < width {
            (dist_from_edge / width).max(0.0)
        } else {
            1.0
        }
    }

    /// Generate one hill. `origin` is recorded but not applied to the geometry.
    pub fn generate(&self, origin: Vec3, params: HillParams) -> HillCluster {
        let cfg = &self.config;
        let mut rng = SeededRng::new(params.seed);

        let secondary_frequency = rng.range(cfg.contour.secondary_frequency[0], cfg.contour.secondary_frequency[1]);
        let secondary_amplitude = rng.range(cfg.contour.secondary_amplitude[0], cfg.contour.secondary_amplitude[1]);

        let segments = cfg.segments as usize;
        let angle_step = TAU / cfg.segments as f32;
        let layer_height = params.height / cfg.layers as f32;
        let tree_threshold = 1.0 - cfg.tree_probability;

        let mut layers = Vec::with_capacity(cfg.layers as usize);
        let mut bushes = Vec::new();
        let mut trees = Vec::new();
        let mut contours = Vec::with_capacity(cfg.layers as usize);

        for i in 0..cfg.layers {
            let y = i as f32 * layer_height;
            let outer_scale = self.layer_scale(params.scale, i);
            let inner_scale = self.layer_scale(params.scale, i + 1);

            if outer_scale < cfg.min_layer_scale {
                log::trace!("seed {}: layer {} below min scale ({:.3}), stopping", params.seed, i, outer_scale);
                break;
            }

            let first_particle = bushes.len();
            let mut points = Vec::with_capacity(segments);
            let mut radius_base = Vec::with_capacity(segments);

            for s in 0..segments {
                let theta = s as f32 / cfg.segments as f32 * TAU;
                let r_base = 1.0
                    + (theta * cfg.contour.primary_frequency + rng.next_f32() * cfg.contour.phase_jitter).sin()
                        * cfg.contour.primary_amplitude
                    + (theta * secondary_frequency).cos() * secondary_amplitude;
                let r_outer = r_base * outer_scale;
                let r_inner = r_base * inner_scale;

                radius_base.push(r_base);
                points.push(Vec3::new(theta.cos() * r_outer, 0.0, theta.sin() * r_outer));

                let arc_length = r_outer * angle_step;
                let thickness = r_outer - r_inner;
                let count = (arc_length * thickness * cfg.density).ceil().max(0.0) as usize;

                for _ in 0..count {
                    // sqrt gives uniform density over the annulus area
                    let r = r_inner + rng.next_f32().sqrt() * thickness;
                    let a = theta + (rng.next_f32() - 0.5) * angle_step;
                    let fade = self.edge_fade(i, r_outer - r);
                    let scale = rng.range(cfg.particle_scale[0], cfg.particle_scale[1]) * fade;
                    let yaw = rng.next_f32() * PI;
                    let vertical_offset = rng.next_f32() * cfg.particle_max_offset;

                    bushes.push(ParticleRecord {
                        position: Vec3::new(a.cos() * r, y, a.sin() * r),
                        scale,
                        rotation: Vec3::new(0.0, yaw, 0.0),
                        vertical_offset,
                    });
                }
            }

            if i as f32 > cfg.layers as f32 * cfg.tree_height_fraction && rng.next_f32() > tree_threshold {
                let idx = ((rng.next_f32() * points.len() as f32) as usize).min(points.len() - 1);
                let anchor = points[idx];
                let scale = rng.range(cfg.tree_scale[0], cfg.tree_scale[1]);
                let yaw = rng.next_f32() * PI;
                trees.push(ParticleRecord {
                    position: Vec3::new(anchor.x, y, anchor.z),
                    scale,
                    rotation: Vec3::new(0.0, yaw, 0.0),
                    vertical_offset: 0.0,
                });
            }

            // The bottom outline would draw a hard ring against the ground
            if i > 0 {
                contours.push(ContourLine { layer_height: y, points });
            }

            layers.push(TerraceLayer {
                index: i,
                height: y,
                outer_scale,
                inner_scale,
                radius_base,
                particles: first_particle..bushes.len(),
            });
        }

        log::debug!(
            "Generated hill seed={} scale={} height={}: {} layers, {} bushes, {} trees, {} contours",
            params.seed,
            params.scale,
            params.height,
            layers.len(),
            bushes.len(),
            trees.len(),
            contours.len()
        );

        HillCluster {
            origin,
            params,
            layers,
            bushes,
            trees,
            contours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_params() -> HillParams {
        HillParams { scale: 16.0, height: 11.0, seed: 10 }
    }

    fn generate(config: HillGenConfig, params: HillParams) -> HillCluster {
        TerracedHillGenerator::new(config).generate(Vec3::new(-5.0, -12.0, 10.0), params)
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(HillGenConfig::default(), example_params());
        let b = generate(HillGenConfig::default(), example_params());
        assert_eq!(a.bushes.len(), b.bushes.len());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(HillGenConfig::default(), example_params());
        let b = generate(HillGenConfig::default(), HillParams { seed: 23, ..example_params() });
        assert_ne!(a.bushes, b.bushes);
    }

    #[test]
    fn test_example_hill_shape() {
        let hill = generate(HillGenConfig::default(), example_params());

        // Scale 16 never drops below the minimum, so all 24 layers exist
        assert_eq!(hill.layers.len(), 24);
        for layer in &hill.layers {
            assert_eq!(layer.radius_base.len(), 90);
        }
        assert_eq!(hill.contours.len(), 23);
        for contour in &hill.contours {
            assert_eq!(contour.points.len(), 90);
        }
        assert!(
            (13_000..15_500).contains(&hill.bushes.len()),
            "unexpected particle count {}",
            hill.bushes.len()
        );
        assert_eq!(hill.origin, Vec3::new(-5.0, -12.0, 10.0));
    }

    #[test]
    fn test_small_hill_stops_early() {
        // 0.5 * (1 - 18/24)^1.2 < 0.1 while layer 17 is still above it
        let hill = generate(HillGenConfig::default(), HillParams { scale: 0.5, height: 3.0, seed: 10 });
        assert_eq!(hill.layers.len(), 18);
        assert_eq!(hill.contours.len(), 17);
        assert!(hill.layers.iter().all(|l| l.outer_scale >= 0.1));
    }

    #[test]
    fn test_layer_scale_tapers() {
        let generator = TerracedHillGenerator::default();
        assert_eq!(generator.layer_scale(16.0, 0), 16.0);
        assert_eq!(generator.layer_scale(16.0, 24), 0.0);
        // Power-law taper is below linear shrinkage
        let linear = 16.0 * (1.0 - 12.0 / 24.0);
        assert!(generator.layer_scale(16.0, 12) < linear);
        for i in 0..24 {
            assert!(generator.layer_scale(16.0, i + 1) < generator.layer_scale(16.0, i));
        }
    }

    #[test]
    fn test_particles_stay_inside_their_annulus() {
        let hill = generate(HillGenConfig::default(), example_params());
        let segments = hill.layers[0].radius_base.len();
        let step = TAU / segments as f32;
        let eps = 1e-3;

        for layer in &hill.layers {
            for p in &hill.bushes[layer.particles.clone()] {
                let radial = Vec3::new(p.position.x, 0.0, p.position.z).length();

                // Angular jitter is at most half a step, so the nearest sample
                // is the one the particle was scattered from. On an exact
                // half-step tie either neighbour may own it.
                let f = p.position.z.atan2(p.position.x).rem_euclid(TAU) / step;
                let candidates = if (f.fract() - 0.5).abs() < 1e-3 {
                    vec![f.floor() as usize % segments, (f.floor() as usize + 1) % segments]
                } else {
                    vec![f.round() as usize % segments]
                };

                let inside = candidates.iter().any(|&s| {
                    let (r_inner, r_outer) = layer.sample_radii(s).unwrap();
                    radial >= r_inner - eps && radial <= r_outer + eps
                });
                assert!(
                    inside,
                    "layer {}: radius {} outside the annulus of samples {:?}",
                    layer.index, radial, candidates
                );
                assert_eq!(p.position.y, layer.height);
            }
        }
    }

    #[test]
    fn test_sample_radii() {
        let hill = generate(HillGenConfig::default(), example_params());
        let layer = &hill.layers[3];
        let (inner, outer) = layer.sample_radii(0).unwrap();
        assert!((outer - layer.radius_base[0] * layer.outer_scale).abs() < 1e-6);
        assert!(inner < outer);
        assert!(layer.sample_radii(90).is_none());
        assert!(layer.max_outer_radius() >= outer);
    }

    #[test]
    fn test_layer_ranges_cover_all_particles() {
        let hill = generate(HillGenConfig::default(), example_params());
        let mut next = 0;
        for layer in &hill.layers {
            assert_eq!(layer.particles.start, next);
            // Every angular sample places at least one particle
            assert!(layer.particles.len() >= 90);
            next = layer.particles.end;
        }
        assert_eq!(next, hill.bushes.len());
    }

    #[test]
    fn test_density_scales_particle_count() {
        let base = generate(HillGenConfig::default(), example_params());
        let dense = generate(HillGenConfig { density: 30.0, ..Default::default() }, example_params());

        // Lower terraces are wide enough that ceiling rounding barely matters
        for (a, b) in base.layers.iter().zip(&dense.layers).take(12) {
            let ratio = b.particles.len() as f32 / a.particles.len() as f32;
            assert!((1.85..=2.05).contains(&ratio), "layer {} ratio {}", a.index, ratio);
        }

        let total_ratio = dense.bushes.len() as f32 / base.bushes.len() as f32;
        assert!((1.75..=2.05).contains(&total_ratio), "total ratio {}", total_ratio);
    }

    #[test]
    fn test_edge_fade_profile() {
        let generator = TerracedHillGenerator::default();

        // Bottom layers: zero at the edge, rising to 1 at the band's inner side
        assert_eq!(generator.edge_fade(0, 0.0), 0.0);
        let mut previous = 0.0;
        for step in 0..=20 {
            let d = step as f32 * 0.05;
            let fade = generator.edge_fade(2, d);
            assert!(fade >= previous);
            assert!((0.0..=1.0).contains(&fade));
            previous = fade;
        }
        assert_eq!(generator.edge_fade(1, 1.0), 1.0);
        assert_eq!(generator.edge_fade(1, 5.0), 1.0);

        // Higher layers are never faded
        assert_eq!(generator.edge_fade(3, 0.0), 1.0);
        assert_eq!(generator.edge_fade(20, 0.3), 1.0);
    }

    #[test]
    fn test_only_bottom_layers_have_faded_particles() {
        let cfg = HillGenConfig::default();
        let hill = generate(cfg.clone(), example_params());
        let [min_scale, max_scale] = cfg.particle_scale;

        let bottom_end = hill.layers[2].particles.end;
        assert!(hill.bushes[..bottom_end].iter().any(|p| p.scale < min_scale));
        for p in &hill.bushes[bottom_end..] {
            assert!(p.scale >= min_scale && p.scale <= max_scale);
        }
    }

    #[test]
    fn test_particle_attributes_in_range() {
        let hill = generate(HillGenConfig::default(), example_params());
        for p in &hill.bushes {
            assert!(p.vertical_offset >= 0.0 && p.vertical_offset < 0.08 + 1e-6);
            assert!(p.rotation.y >= 0.0 && p.rotation.y <= PI);
            assert_eq!(p.rotation.x, 0.0);
            assert_eq!(p.rotation.z, 0.0);
        }
    }

    #[test]
    fn test_trees_grow_on_upper_layers_at_contour_points() {
        let cfg = HillGenConfig::default();
        let generator = TerracedHillGenerator::new(cfg.clone());
        let mut total_trees = 0;

        for seed in [10, 23, 33, 44, 55, 66, 77] {
            let hill = generator.generate(Vec3::ZERO, HillParams { scale: 18.0, height: 12.0, seed });
            let layer_height = 12.0 / cfg.layers as f32;
            for tree in &hill.trees {
                let layer = (tree.position.y / layer_height).round() as u32;
                assert!(layer as f32 > cfg.layers as f32 * cfg.tree_height_fraction);
                assert!(tree.scale >= 0.5 && tree.scale <= 1.1);

                let contour = hill
                    .contours
                    .iter()
                    .find(|c| c.layer_height == tree.position.y)
                    .expect("tree layer has a contour");
                let on_contour = contour
                    .points
                    .iter()
                    .any(|p| (p.x - tree.position.x).abs() < 1e-6 && (p.z - tree.position.z).abs() < 1e-6);
                assert!(on_contour);
            }
            total_trees += hill.trees.len();
        }
        assert!(total_trees > 0);
    }

    #[test]
    fn test_contours_skip_bottom_layer() {
        let hill = generate(HillGenConfig::default(), example_params());
        assert!(hill.contours.iter().all(|c| c.layer_height > 0.0));
        assert_eq!(hill.contours[0].layer_height, hill.layers[1].height);
        // Contour points trace the outer radius in the local y = 0 plane
        let layer = &hill.layers[1];
        for (s, p) in hill.contours[0].points.iter().enumerate() {
            assert_eq!(p.y, 0.0);
            let expected = layer.radius_base[s] * layer.outer_scale;
            assert!((Vec3::new(p.x, 0.0, p.z).length() - expected).abs() < 1e-3);
        }
    }
}

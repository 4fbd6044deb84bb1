//! Scene composition: builds every generated element once, then drives them
//! from one blend snapshot per frame.

use glam::Vec3;
use rand::Rng;
use rayon::prelude::*;

use super::config::{FloorConfig, HillPlacement, SceneConfig};
use super::lights::LightRig;
use crate::core::Result;
use crate::generation::{HillCluster, TerracedHillGenerator, generate_city, generate_dust};
use crate::instancing::{CityInstances, DustInstances, HillInstances};
use crate::transition::{BlendSnapshot, Environment, TransitionController};

/// Generate every placement. Clusters are independent, so they are built in
/// parallel; output order matches `placements`.
pub fn generate_hills(generator: &TerracedHillGenerator, placements: &[HillPlacement]) -> Vec<HillCluster> {
    placements
        .par_iter()
        .map(|h| generator.generate(h.position, h.params()))
        .collect()
}

/// Per-frame draw counts, for logging and tests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub hill_instances: usize,
    pub contour_loops: usize,
    pub city_instances: usize,
    pub dust_instances: usize,
    pub floor: bool,
}

/// The whole scene: generated content, draw batches and environment state
pub struct Scene {
    config: SceneConfig,
    controller: TransitionController,
    clusters: Vec<HillCluster>,
    hills: Vec<HillInstances>,
    city: CityInstances,
    dust: DustInstances,
    environment: Environment,
}

impl Scene {
    /// Build the scene, scattering the city and dust with thread-local randomness
    pub fn new(config: SceneConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Build the scene with a caller-supplied source for the unseeded scatter
    pub fn with_rng<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let generator = TerracedHillGenerator::new(config.hill_generation.clone());
        let clusters = generate_hills(&generator, &config.hills);
        let hills = clusters
            .iter()
            .map(|c| HillInstances::new(c, &config.hill_style))
            .collect();

        let city = CityInstances::new(generate_city(&config.city, rng), config.city_palette.clone());
        let dust = DustInstances::new(generate_dust(&config.dust, rng), config.dust.clone(), &config.dust_style);

        let controller = TransitionController::new(config.transition.clone(), config.environment.clone());
        let environment = Environment::new(&config.environment);

        log::info!(
            "Scene built: {} hills ({} particles, {} trees), {} city tiles, {} dust motes",
            clusters.len(),
            clusters.iter().map(|c| c.bushes.len()).sum::<usize>(),
            clusters.iter().map(|c| c.trees.len()).sum::<usize>(),
            city.tiles().len(),
            dust.motes().len(),
        );

        Ok(Self {
            config,
            controller,
            clusters,
            hills,
            city,
            dust,
            environment,
        })
    }

    /// Per-frame update.
    ///
    /// Computes one snapshot from the camera's distance to the origin and
    /// pushes it into the environment and every batch. The snapshot is
    /// returned by value; nothing derived from it is kept between frames
    /// except what the batches and environment hold for drawing.
    pub fn update(&mut self, camera_position: Vec3, elapsed_secs: f32) -> BlendSnapshot {
        let snapshot = self.controller.snapshot(camera_position.length());

        self.environment.apply(&snapshot);
        for hill in &mut self.hills {
            hill.update(&snapshot);
        }
        self.city.update(&snapshot, elapsed_secs as f64 * 1000.0);
        self.dust.update(&snapshot, elapsed_secs);

        log::trace!(
            "frame: distance={:.2} t={:.3} hills={:.3} spread={:.2} fade={:.2}",
            snapshot.distance,
            snapshot.t,
            snapshot.hill_visibility,
            snapshot.city_spread,
            snapshot.city_fade
        );
        snapshot
    }

    pub fn draw_stats(&self) -> DrawStats {
        DrawStats {
            hill_instances: self
                .hills
                .iter()
                .map(|h| h.bushes.draw_count() + h.trees.draw_count())
                .sum(),
            contour_loops: self.hills.iter().map(|h| h.contours.draw_count()).sum(),
            city_instances: self.city.batch.draw_count(),
            dust_instances: self.dust.batch.draw_count(),
            floor: self.environment.floor_visible(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn clusters(&self) -> &[HillCluster] {
        &self.clusters
    }

    pub fn hills(&self) -> &[HillInstances] {
        &self.hills
    }

    pub fn city(&self) -> &CityInstances {
        &self.city
    }

    pub fn dust(&self) -> &DustInstances {
        &self.dust
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn lights(&self) -> &LightRig {
        &self.config.lights
    }

    pub fn floor(&self) -> &FloorConfig {
        &self.config.floor
    }
}

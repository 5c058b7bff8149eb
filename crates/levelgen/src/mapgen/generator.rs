//! High-level level generation that composes layout, corridors, obstacles,
//! playability, and wall materialization.

use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::rng::{RandomSource, entropy_rng};

use super::connectivity::connected_components;
use super::connector::{ConnectionReport, connect_rooms};
use super::environment::select_environment;
use super::layout::{LayoutContext, build_layout};
use super::model::{GeneratedLevel, Morality};
use super::obstacles::{PlacementReport, place_obstacles};
use super::playability::{OptimizationReport, OptimizerContext, optimize_rooms};
use super::progression::LayoutTier;
use super::walls::{WallReport, materialize_walls};

/// Owns one policy table and one random source. Each instance is meant for a
/// single caller; build a separate generator per thread.
pub struct LevelGenerator<R> {
    config: GenerationConfig,
    rng: R,
}

impl LevelGenerator<ChaCha8Rng> {
    pub fn from_entropy(config: GenerationConfig) -> Self {
        Self::new(config, entropy_rng())
    }
}

impl<R: RandomSource> LevelGenerator<R> {
    /// Panics when `config` fails validation.
    pub fn new(config: GenerationConfig, rng: R) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid generation config: {err}");
        }
        Self { config, rng }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&mut self, wave: u32, morality: Option<Morality>) -> GeneratedLevel {
        self.generate_with_summary(wave, morality).0
    }

    fn generate_with_summary(
        &mut self,
        wave: u32,
        morality: Option<Morality>,
    ) -> (GeneratedLevel, RunSummary) {
        assert!(wave > 0, "wave numbers start at 1");
        let config = &self.config;
        let world = config.world.bounds();

        let theme = select_environment(morality, &config.themes);
        let tier = LayoutTier::for_wave(wave, &config.tiers);
        let layout_context = LayoutContext { world, config: &config.layout, theme, wave };
        let mut rooms = build_layout(tier, &layout_context, &mut self.rng);
        log::debug!("wave {wave}: {tier:?} layout produced {} rooms", rooms.len());

        let connections = connect_rooms(&mut rooms, &world, &config.connector, &mut self.rng);
        let placement = place_obstacles(&mut rooms, &config.obstacles, &mut self.rng);
        let optimization = optimize_rooms(
            &mut rooms,
            &OptimizerContext {
                config: &config.playability,
                boundary_margin: config.obstacles.boundary_margin,
            },
            &mut self.rng,
        );

        let regions = connected_components(&rooms).len();
        if regions > 1 {
            log::warn!("wave {wave}: {tier:?} level split into {regions} disconnected regions");
        }

        let (walls, wall_report) = materialize_walls(&rooms, &config.world);
        let summary = RunSummary { connections, placement, optimization, walls: wall_report };
        log::info!(
            "generated wave {wave}: {tier:?} layout, {theme:?} theme, {} rooms \
             ({} corridor pieces), {} obstacles ({} cover, {} dropped), {} walls ({} fill)",
            rooms.len(),
            summary.connections.corridor_rooms,
            summary.walls.obstacle_walls,
            summary.optimization.cover_pieces,
            summary.placement.rejected,
            walls.len(),
            summary.walls.fill_walls
        );

        (GeneratedLevel { wave, tier, theme, rooms, walls }, summary)
    }
}

/// Per-stage counts from one run, reported in the run's `info!` line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RunSummary {
    connections: ConnectionReport,
    placement: PlacementReport,
    optimization: OptimizationReport,
    walls: WallReport,
}

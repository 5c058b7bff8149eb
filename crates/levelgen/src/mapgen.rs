//! Procedural level generation split into coherent submodules.
//!
//! Callers that only need collision geometry or spawn coordinates use the free
//! functions here; they build a fresh entropy-seeded [`LevelGenerator`] per
//! call with the default [`GenerationConfig`].

pub mod model;
pub mod progression;

mod connectivity;
mod connector;
mod environment;
mod generator;
mod grid;
mod layout;
mod obstacles;
mod playability;
mod spawns;
mod walls;

pub use connectivity::{connected_components, is_fully_connected};
pub use environment::{CoverStyle, EnvironmentTheme, select_environment};
pub use generator::LevelGenerator;
pub use model::{GeneratedLevel, Morality, Room, RoomKind, boss_arena, tags};
pub use playability::{center_zone, edge_lanes};
pub use progression::{LayoutTier, is_boss_wave};
pub use spawns::{enemy_spawn_positions, fallback_spawn_positions};
pub use walls::border_walls;

use crate::config::GenerationConfig;
use crate::geometry::Rect;

pub fn generate_level(wave: u32, morality: Option<Morality>) -> GeneratedLevel {
    LevelGenerator::from_entropy(GenerationConfig::default()).generate(wave, morality)
}

/// Collision walls for one wave: world borders, obstacles, and solid fill.
pub fn generate_walls_for_wave(wave: u32, morality: Option<Morality>) -> Vec<Rect> {
    generate_level(wave, morality).walls
}

pub fn get_enemy_spawn_positions(wave: u32, morality: Option<Morality>) -> Vec<(i32, i32)> {
    let config = GenerationConfig::default();
    let level = LevelGenerator::from_entropy(config.clone()).generate(wave, morality);
    enemy_spawn_positions(&level, &config.world)
}

pub fn get_boss_arena(rooms: &[Room]) -> Option<&Room> {
    boss_arena(rooms)
}

pub mod config;
pub mod geometry;
pub mod mapgen;
pub mod rng;

pub use config::{ConfigError, GenerationConfig};
pub use geometry::{Point, Rect};
pub use mapgen::{
    EnvironmentTheme, GeneratedLevel, LayoutTier, LevelGenerator, Morality, Room, RoomKind,
    generate_level, generate_walls_for_wave, get_boss_arena, get_enemy_spawn_positions,
};
pub use rng::RandomSource;

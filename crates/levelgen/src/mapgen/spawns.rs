//! Enemy spawn position selection with a world-relative fallback.

use crate::config::WorldConfig;
use crate::geometry::Point;

use super::model::GeneratedLevel;

const FALLBACK_FRACTIONS: [f32; 3] = [0.1, 0.5, 0.9];

/// Spawn points collected from the level's rooms, or the fallback ring when
/// no room produced any.
pub fn enemy_spawn_positions(level: &GeneratedLevel, world: &WorldConfig) -> Vec<(i32, i32)> {
    let positions = level.spawn_points();
    if !positions.is_empty() {
        return positions;
    }
    log::warn!("wave {} produced no room spawn points, using fallback positions", level.wave);
    fallback_spawn_positions(world)
}

/// Four inset corners and four inset edge midpoints at 10%, 50%, and 90% of
/// the world extents.
pub fn fallback_spawn_positions(world: &WorldConfig) -> Vec<(i32, i32)> {
    let mut positions = Vec::with_capacity(8);
    for fy in FALLBACK_FRACTIONS {
        for fx in FALLBACK_FRACTIONS {
            if fx == 0.5 && fy == 0.5 {
                continue;
            }
            positions.push(Point::new(world.width * fx, world.height * fy).to_int());
        }
    }
    positions
}

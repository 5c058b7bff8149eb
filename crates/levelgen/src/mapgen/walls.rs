//! Flattens the room graph into the collision wall list.

use crate::config::WorldConfig;
use crate::geometry::Rect;

use super::grid::OccupancyGrid;
use super::model::Room;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct WallReport {
    pub(super) obstacle_walls: usize,
    pub(super) fill_walls: usize,
}

/// Emits border walls first, then every room obstacle, then one solid block
/// per grid cell no room claims.
pub(super) fn materialize_walls(rooms: &[Room], world: &WorldConfig) -> (Vec<Rect>, WallReport) {
    let bounds = world.bounds();
    let mut walls = border_walls(&bounds, world.border_thickness).to_vec();

    let mut report = WallReport::default();
    for room in rooms {
        walls.extend_from_slice(&room.obstacles);
        report.obstacle_walls += room.obstacles.len();
    }

    let mut grid = OccupancyGrid::new(bounds, world.fill_cell_size);
    for room in rooms {
        grid.mark(&room.bounds);
    }
    let before_fill = walls.len();
    walls.extend(grid.free_cells());
    report.fill_walls = walls.len() - before_fill;

    log::debug!(
        "materialized {} walls ({} obstacles, {} fill cells over a {}x{} grid)",
        walls.len(),
        report.obstacle_walls,
        report.fill_walls,
        grid.columns(),
        grid.rows()
    );
    (walls, report)
}

/// Top, bottom, left, and right walls spanning the full world extents.
pub fn border_walls(world: &Rect, thickness: f32) -> [Rect; 4] {
    [
        Rect::new(world.x, world.y, world.width, thickness),
        Rect::new(world.x, world.bottom() - thickness, world.width, thickness),
        Rect::new(world.x, world.y, thickness, world.height),
        Rect::new(world.right() - thickness, world.y, thickness, world.height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::{EnvironmentTheme, RoomKind};

    fn small_world() -> WorldConfig {
        WorldConfig { width: 512.0, height: 256.0, border_thickness: 16.0, fill_cell_size: 128.0 }
    }

    #[test]
    fn empty_level_is_borders_plus_solid_fill() {
        let (walls, report) = materialize_walls(&[], &small_world());
        assert_eq!(report, WallReport { obstacle_walls: 0, fill_walls: 8 });
        assert_eq!(walls.len(), 12);
        assert_eq!(walls[0], Rect::new(0.0, 0.0, 512.0, 16.0));
        assert_eq!(walls[1], Rect::new(0.0, 240.0, 512.0, 16.0));
        assert_eq!(walls[2], Rect::new(0.0, 0.0, 16.0, 256.0));
        assert_eq!(walls[3], Rect::new(496.0, 0.0, 16.0, 256.0));
    }

    #[test]
    fn obstacles_become_walls_and_rooms_suppress_fill() {
        let mut room = Room::new(
            Rect::new(0.0, 0.0, 256.0, 256.0),
            RoomKind::Chamber,
            EnvironmentTheme::SpaceHulk,
        );
        room.obstacles.push(Rect::new(100.0, 100.0, 60.0, 60.0));

        let (walls, report) = materialize_walls(&[room], &small_world());

        assert_eq!(report, WallReport { obstacle_walls: 1, fill_walls: 4 });
        assert_eq!(walls[4], Rect::new(100.0, 100.0, 60.0, 60.0));
        let room_bounds = Rect::new(0.0, 0.0, 256.0, 256.0);
        assert!(walls[5..].iter().all(|fill| !fill.intersects(&room_bounds)));
    }
}

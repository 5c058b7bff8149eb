//! Theme-sized random obstacle placement inside non-corridor rooms.

use crate::config::ObstacleConfig;
use crate::geometry::Rect;
use crate::rng::RandomSource;

use super::model::{Room, RoomKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct PlacementReport {
    pub(super) placed: usize,
    pub(super) rejected: usize,
}

pub(super) fn place_obstacles<R: RandomSource + ?Sized>(
    rooms: &mut [Room],
    config: &ObstacleConfig,
    rng: &mut R,
) -> PlacementReport {
    let mut report = PlacementReport::default();
    for room in rooms.iter_mut().filter(|room| room.kind != RoomKind::Corridor) {
        let target = target_obstacle_count(room, config);
        for _ in 0..target {
            if try_random_obstacle(room, config.boundary_margin, rng) {
                report.placed += 1;
            } else {
                report.rejected += 1;
            }
        }
    }
    log::debug!("placed {} obstacles, dropped {} candidates", report.placed, report.rejected);
    report
}

pub(super) fn target_obstacle_count(room: &Room, config: &ObstacleConfig) -> usize {
    let multiplier = config.kind_multipliers.for_kind(room.kind);
    let raw = room.area() * config.base_density / config.density_normalization * multiplier;
    raw.max(0.0).floor() as usize
}

/// Draws one candidate and keeps it only if it fits. Candidates that do not
/// fit are dropped rather than retried.
fn try_random_obstacle<R: RandomSource + ?Sized>(
    room: &mut Room,
    margin: f32,
    rng: &mut R,
) -> bool {
    let (min_size, max_size) = room.theme.obstacle_size_range();
    let width = rng.range_f32(min_size, max_size);
    let height = rng.range_f32(min_size, max_size);
    let Some(inner) = room.bounds.inset(margin) else {
        return false;
    };
    if width > inner.width || height > inner.height {
        return false;
    }
    let x = rng.range_f32(inner.x, inner.right() - width);
    let y = rng.range_f32(inner.y, inner.bottom() - height);
    let candidate = Rect::new(x, y, width, height);
    if !fits(room, &candidate, margin) {
        return false;
    }
    room.obstacles.push(candidate);
    true
}

/// True when `candidate` keeps `margin` from the room boundary and overlaps
/// none of the room's existing obstacles.
pub(super) fn fits(room: &Room, candidate: &Rect, margin: f32) -> bool {
    let Some(inner) = room.bounds.inset(margin) else {
        return false;
    };
    candidate.is_valid()
        && inner.contains_rect(candidate)
        && !room.obstacles.iter().any(|existing| existing.intersects(candidate))
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::mapgen::EnvironmentTheme;
    use crate::rng::test_support::ScriptedSource;

    fn room(width: f32, height: f32, kind: RoomKind) -> Room {
        Room::new(Rect::new(0.0, 0.0, width, height), kind, EnvironmentTheme::Battlefield)
    }

    #[test]
    fn scripted_draws_place_an_exact_obstacle() {
        let mut rooms = vec![room(400.0, 400.0, RoomKind::Chamber)];
        let mut source = ScriptedSource::units(&[0.5, 0.25, 0.0, 0.5]);

        let report = place_obstacles(&mut rooms, &ObstacleConfig::default(), &mut source);

        assert_eq!(report, PlacementReport { placed: 1, rejected: 0 });
        assert_eq!(rooms[0].obstacles, vec![Rect::new(50.0, 180.0, 50.0, 40.0)]);
    }

    #[test]
    fn overlapping_candidates_are_dropped_without_retry() {
        let mut rooms = vec![room(600.0, 600.0, RoomKind::Maze)];
        let mut source = ScriptedSource::units(&[0.5, 0.5, 0.5, 0.5]);

        let report = place_obstacles(&mut rooms, &ObstacleConfig::default(), &mut source);

        assert_eq!(target_obstacle_count(&rooms[0], &ObstacleConfig::default()), 5);
        assert_eq!(report, PlacementReport { placed: 1, rejected: 4 });
        assert_eq!(rooms[0].obstacles.len(), 1);
    }

    #[test]
    fn counts_scale_with_area_and_kind() {
        let config = ObstacleConfig::default();
        let arena = room(2000.0, 1000.0, RoomKind::Arena);
        let maze = room(2000.0, 1000.0, RoomKind::Maze);
        let corridor = room(2000.0, 1000.0, RoomKind::Corridor);
        assert_eq!(target_obstacle_count(&arena, &config), 8);
        assert_eq!(target_obstacle_count(&maze, &config), 32);
        assert_eq!(target_obstacle_count(&corridor, &config), 0);
    }

    #[test]
    fn corridors_and_undersized_rooms_stay_empty() {
        let mut rooms =
            vec![room(1200.0, 300.0, RoomKind::Corridor), room(90.0, 4000.0, RoomKind::Maze)];
        place_obstacles(&mut rooms, &ObstacleConfig::default(), &mut ChaCha8Rng::seed_from_u64(8));
        assert!(rooms[0].obstacles.is_empty());
        assert!(rooms[1].obstacles.is_empty());
    }

    #[test]
    fn placed_obstacles_never_overlap_and_respect_margin() {
        let config = ObstacleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(31_337);
        for kind in [RoomKind::Chamber, RoomKind::Chokepoint, RoomKind::Maze, RoomKind::Arena] {
            let mut rooms = vec![room(900.0, 700.0, kind)];
            place_obstacles(&mut rooms, &config, &mut rng);

            let inner = rooms[0].bounds.inset(config.boundary_margin).expect("room fits margin");
            let obstacles = &rooms[0].obstacles;
            assert!(!obstacles.is_empty(), "{kind:?} room got no obstacles");
            for (index, obstacle) in obstacles.iter().enumerate() {
                assert!(inner.contains_rect(obstacle), "{obstacle:?} breaks the margin");
                for other in &obstacles[index + 1..] {
                    assert!(!obstacle.intersects(other), "{obstacle:?} overlaps {other:?}");
                }
            }
        }
    }
}

//! Corridor construction between layout rooms.
//!
//! Each corridor is an L-shaped pair of `Corridor` rooms joining two room
//! centers. Rooms with no connection are linked to their nearest neighbor,
//! leftover islands are bridged to the main component, and a few wider
//! redundant corridors are added at random.

use crate::config::ConnectorConfig;
use crate::geometry::{Point, Rect};
use crate::rng::RandomSource;

use super::connectivity::DisjointSets;
use super::model::{Room, RoomKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct ConnectionReport {
    pub(super) nearest_links: usize,
    pub(super) bridge_links: usize,
    pub(super) extra_links: usize,
    pub(super) corridor_rooms: usize,
}

pub(super) fn connect_rooms<R: RandomSource + ?Sized>(
    rooms: &mut Vec<Room>,
    world: &Rect,
    config: &ConnectorConfig,
    rng: &mut R,
) -> ConnectionReport {
    let mut report = ConnectionReport::default();
    let layout_count = rooms.len();
    if layout_count < 2 {
        return report;
    }

    let mut sets = DisjointSets::new(layout_count);
    for index in 0..layout_count {
        if !rooms[index].connections.is_empty() {
            continue;
        }
        let Some(nearest) = nearest_room(rooms, layout_count, index) else {
            log::warn!("room {index} has no partner to connect to");
            continue;
        };
        report.corridor_rooms +=
            connect_pair(rooms, index, nearest, config.corridor_width, world, rng);
        sets.union(index, nearest);
        report.nearest_links += 1;
    }

    bridge_components(rooms, layout_count, &mut sets, world, config, rng, &mut report);

    let attempts = config.extra_connections * config.extra_attempts_per_connection;
    for _ in 0..attempts {
        if report.extra_links >= config.extra_connections {
            break;
        }
        let a = rng.range_usize(0, layout_count - 1);
        let b = rng.range_usize(0, layout_count - 1);
        if a == b || rooms[a].is_connected_to(&rooms[b]) {
            continue;
        }
        report.corridor_rooms +=
            connect_pair(rooms, a, b, config.extra_corridor_width, world, rng);
        report.extra_links += 1;
    }

    log::debug!(
        "connected {layout_count} rooms: {} nearest, {} bridge, {} extra links, {} corridor rooms",
        report.nearest_links,
        report.bridge_links,
        report.extra_links,
        report.corridor_rooms
    );
    report
}

fn nearest_room(rooms: &[Room], layout_count: usize, index: usize) -> Option<usize> {
    let origin = rooms[index].center();
    (0..layout_count)
        .filter(|&other| other != index)
        .min_by(|&a, &b| {
            origin.distance(rooms[a].center()).total_cmp(&origin.distance(rooms[b].center()))
        })
}

/// Joins every component that nearest-neighbor linking left isolated to the
/// component holding room 0, always through the shortest available link.
fn bridge_components<R: RandomSource + ?Sized>(
    rooms: &mut Vec<Room>,
    layout_count: usize,
    sets: &mut DisjointSets,
    world: &Rect,
    config: &ConnectorConfig,
    rng: &mut R,
    report: &mut ConnectionReport,
) {
    loop {
        let mut best_choice: Option<(f32, usize, usize)> = None;
        for connected_index in 0..layout_count {
            if !sets.same_set(0, connected_index) {
                continue;
            }
            let connected_center = rooms[connected_index].center();
            for pending_index in 0..layout_count {
                if sets.same_set(0, pending_index) {
                    continue;
                }
                let distance = connected_center.distance(rooms[pending_index].center());
                if best_choice.is_none_or(|(best_distance, _, _)| distance < best_distance) {
                    best_choice = Some((distance, connected_index, pending_index));
                }
            }
        }

        let Some((_, connected_index, pending_index)) = best_choice else {
            return;
        };
        report.corridor_rooms +=
            connect_pair(rooms, connected_index, pending_index, config.corridor_width, world, rng);
        sets.union(connected_index, pending_index);
        report.bridge_links += 1;
    }
}

/// Carves an L-shaped corridor between rooms `a` and `b` and records the
/// endpoints on both. Returns the number of corridor rooms appended.
fn connect_pair<R: RandomSource + ?Sized>(
    rooms: &mut Vec<Room>,
    a: usize,
    b: usize,
    width: f32,
    world: &Rect,
    rng: &mut R,
) -> usize {
    let start = rooms[a].center();
    let end = rooms[b].center();
    let theme = rooms[a].theme;
    let horizontal_first = rng.coin_flip();

    let pieces: Vec<Rect> = l_corridor_pieces(start, end, width, horizontal_first)
        .into_iter()
        .filter_map(|piece| piece.clipped_to(world))
        .collect();
    let appended = pieces.len();
    for piece in pieces {
        let mut corridor = Room::new(piece, RoomKind::Corridor, theme);
        corridor.connections.extend([start, end]);
        rooms.push(corridor);
    }

    rooms[a].connections.push(end);
    rooms[b].connections.push(start);
    appended
}

/// Rectangles covering the two legs of an L-path from `start` to `end`.
/// Legs are padded by half the width at both ends so the elbow is filled;
/// zero-length legs are skipped.
pub(super) fn l_corridor_pieces(
    start: Point,
    end: Point,
    width: f32,
    horizontal_first: bool,
) -> Vec<Rect> {
    let elbow =
        if horizontal_first { Point::new(end.x, start.y) } else { Point::new(start.x, end.y) };
    [(start, elbow), (elbow, end)]
        .into_iter()
        .filter_map(|(from, to)| leg_rect(from, to, width))
        .collect()
}

fn leg_rect(from: Point, to: Point, width: f32) -> Option<Rect> {
    let half = width / 2.0;
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    if dx > 0.0 {
        Some(Rect::new(from.x.min(to.x) - half, from.y - half, dx + width, width))
    } else if dy > 0.0 {
        Some(Rect::new(from.x - half, from.y.min(to.y) - half, width, dy + width))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::mapgen::EnvironmentTheme;
    use crate::mapgen::connectivity::is_fully_connected;

    const WORLD: Rect = Rect { x: 0.0, y: 0.0, width: 3072.0, height: 2304.0 };

    fn room_at(center: Point, kind: RoomKind) -> Room {
        Room::new(Rect::centered(center, 200.0, 200.0), kind, EnvironmentTheme::SpaceHulk)
    }

    fn lerp(from: Point, to: Point, t: f32) -> Point {
        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    }

    fn covers(pieces: &[Rect], point: Point) -> bool {
        pieces.iter().any(|piece| piece.contains(point))
    }

    #[test]
    fn rooms_500_apart_get_two_corridor_pieces_covering_the_l_path() {
        let start = Point::new(1000.0, 1000.0);
        let end = Point::new(1300.0, 1400.0);
        let mut rooms = vec![room_at(start, RoomKind::Chamber), room_at(end, RoomKind::Arena)];
        let config = ConnectorConfig { extra_connections: 0, ..ConnectorConfig::default() };

        let report =
            connect_rooms(&mut rooms, &WORLD, &config, &mut ChaCha8Rng::seed_from_u64(4));

        assert_eq!(report.corridor_rooms, 2);
        assert_eq!(rooms.len(), 4);
        let pieces: Vec<Rect> = rooms[2..].iter().map(|room| room.bounds).collect();
        assert!(rooms[2..].iter().all(|room| room.kind == RoomKind::Corridor));
        assert!(pieces.iter().all(|piece| piece.width == 80.0 || piece.height == 80.0));

        let horizontal_first = covers(&pieces, Point::new(1300.0, 1000.0));
        let elbow = if horizontal_first {
            Point::new(1300.0, 1000.0)
        } else {
            Point::new(1000.0, 1400.0)
        };
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            let first_leg = lerp(start, elbow, t);
            let second_leg = lerp(elbow, end, t);
            assert!(covers(&pieces, first_leg), "first leg gap at {first_leg:?}");
            assert!(covers(&pieces, second_leg), "second leg gap at {second_leg:?}");
        }

        assert_eq!(rooms[0].connections, vec![end]);
        assert_eq!(rooms[1].connections, vec![start]);
    }

    #[test]
    fn aligned_centers_skip_the_zero_length_leg() {
        let pieces =
            l_corridor_pieces(Point::new(0.0, 50.0), Point::new(400.0, 50.0), 60.0, false);
        assert_eq!(pieces, vec![Rect::new(-30.0, 20.0, 460.0, 60.0)]);

        let same = Point::new(5.0, 5.0);
        assert!(l_corridor_pieces(same, same, 60.0, true).is_empty());
    }

    #[test]
    fn every_layout_room_gets_an_endpoint() {
        let centers = [
            Point::new(300.0, 300.0),
            Point::new(700.0, 350.0),
            Point::new(2600.0, 1900.0),
            Point::new(2200.0, 2000.0),
            Point::new(1500.0, 1100.0),
        ];
        let mut rooms: Vec<Room> =
            centers.iter().map(|&center| room_at(center, RoomKind::Chamber)).collect();

        let config = ConnectorConfig::default();
        connect_rooms(&mut rooms, &WORLD, &config, &mut ChaCha8Rng::seed_from_u64(9));

        for room in &rooms[..centers.len()] {
            assert!(!room.connections.is_empty(), "room at {:?} is unconnected", room.center());
        }
    }

    #[test]
    fn isolated_pairs_are_bridged_into_one_component() {
        // Two tight pairs far apart: nearest-neighbor alone yields two islands.
        let centers = [
            Point::new(300.0, 300.0),
            Point::new(600.0, 300.0),
            Point::new(2500.0, 1900.0),
            Point::new(2800.0, 1900.0),
        ];
        let mut rooms: Vec<Room> =
            centers.iter().map(|&center| room_at(center, RoomKind::Chamber)).collect();
        let config = ConnectorConfig { extra_connections: 0, ..ConnectorConfig::default() };

        let report =
            connect_rooms(&mut rooms, &WORLD, &config, &mut ChaCha8Rng::seed_from_u64(11));

        assert_eq!(report.bridge_links, 1);
        assert!(is_fully_connected(&rooms));
    }

    #[test]
    fn extra_links_only_join_rooms_not_already_connected() {
        let centers = [
            Point::new(300.0, 300.0),
            Point::new(1500.0, 300.0),
            Point::new(2700.0, 300.0),
            Point::new(300.0, 1900.0),
            Point::new(1500.0, 1900.0),
            Point::new(2700.0, 1900.0),
        ];
        let mut rooms: Vec<Room> =
            centers.iter().map(|&center| room_at(center, RoomKind::Chamber)).collect();

        let report = connect_rooms(
            &mut rooms,
            &WORLD,
            &ConnectorConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(2024),
        );

        assert!(report.extra_links <= 2);
        for room in &rooms[..centers.len()] {
            let mut endpoints = room.connections.clone();
            endpoints.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
            endpoints.dedup();
            assert_eq!(
                endpoints.len(),
                room.connections.len(),
                "duplicate link on {:?}",
                room.center()
            );
        }
        let wide = rooms[centers.len()..]
            .iter()
            .filter(|room| room.bounds.width == 120.0 || room.bounds.height == 120.0)
            .count();
        assert!(wide >= report.extra_links);
    }

    #[test]
    fn single_room_is_left_alone() {
        let mut rooms = vec![room_at(Point::new(500.0, 500.0), RoomKind::Arena)];
        let report = connect_rooms(
            &mut rooms,
            &WORLD,
            &ConnectorConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        assert_eq!(report, ConnectionReport::default());
        assert_eq!(rooms.len(), 1);
        assert!(rooms[0].connections.is_empty());
    }
}

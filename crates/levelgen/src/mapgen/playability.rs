//! Post-placement pass that keeps arenas and chambers playable under fire.
//!
//! Arenas run, in order: clear the center zone, add perimeter spawn points,
//! stamp theme cover, then clear the four edge lanes. Chambers get cover and
//! edge lanes only. Lanes are cleared last so cover can never block them.

use std::f32::consts::TAU;

use crate::config::PlayabilityConfig;
use crate::geometry::{Point, Rect};
use crate::rng::RandomSource;

use super::environment::CoverStyle;
use super::model::{Room, RoomKind};
use super::obstacles::fits;

const RADIAL_CLUSTER_PIECES: usize = 6;
const BARRICADE_LENGTH_FACTOR: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct OptimizationReport {
    pub(super) cleared_from_center: usize,
    pub(super) cleared_from_lanes: usize,
    pub(super) cover_pieces: usize,
    pub(super) spawn_points: usize,
}

pub(super) struct OptimizerContext<'a> {
    pub(super) config: &'a PlayabilityConfig,
    pub(super) boundary_margin: f32,
}

pub(super) fn optimize_rooms<R: RandomSource + ?Sized>(
    rooms: &mut [Room],
    context: &OptimizerContext<'_>,
    rng: &mut R,
) -> OptimizationReport {
    let config = context.config;
    let mut report = OptimizationReport::default();
    for room in rooms.iter_mut() {
        match room.kind {
            RoomKind::Arena => {
                let zone = center_zone(&room.bounds, config.center_zone_ratio);
                report.cleared_from_center += remove_intersecting(room, &[zone]);
                report.spawn_points += add_perimeter_spawns(room, config.spawn_inset);
                report.cover_pieces +=
                    add_cover(room, 1.0, Some(zone), context.boundary_margin, rng);
                report.cleared_from_lanes +=
                    remove_intersecting(room, &edge_lanes(&room.bounds, config.edge_lane_width));
            }
            RoomKind::Chamber => {
                report.cover_pieces +=
                    add_cover(room, config.chamber_cover_scale, None, context.boundary_margin, rng);
                report.cleared_from_lanes +=
                    remove_intersecting(room, &edge_lanes(&room.bounds, config.edge_lane_width));
            }
            _ => {}
        }
    }
    log::debug!(
        "playability pass: {} center and {} lane obstacles cleared, {} cover pieces, {} spawns",
        report.cleared_from_center,
        report.cleared_from_lanes,
        report.cover_pieces,
        report.spawn_points
    );
    report
}

/// Open maneuvering zone centered in `bounds`, sized as `ratio` of each side.
pub fn center_zone(bounds: &Rect, ratio: f32) -> Rect {
    Rect::centered(bounds.center(), bounds.width * ratio, bounds.height * ratio)
}

/// Top, bottom, left, and right bands of `width` hugging the room edges.
pub fn edge_lanes(bounds: &Rect, width: f32) -> [Rect; 4] {
    let horizontal = width.min(bounds.height / 2.0);
    let vertical = width.min(bounds.width / 2.0);
    [
        Rect::new(bounds.x, bounds.y, bounds.width, horizontal),
        Rect::new(bounds.x, bounds.bottom() - horizontal, bounds.width, horizontal),
        Rect::new(bounds.x, bounds.y, vertical, bounds.height),
        Rect::new(bounds.right() - vertical, bounds.y, vertical, bounds.height),
    ]
}

fn remove_intersecting(room: &mut Room, zones: &[Rect]) -> usize {
    let before = room.obstacles.len();
    room.obstacles.retain(|obstacle| !zones.iter().any(|zone| zone.intersects(obstacle)));
    before - room.obstacles.len()
}

fn add_perimeter_spawns(room: &mut Room, inset: f32) -> usize {
    let bounds = room.bounds;
    let center = bounds.center();
    let inset_x = inset.min(bounds.width / 2.0);
    let inset_y = inset.min(bounds.height / 2.0);
    let spawns = [
        Point::new(bounds.x + inset_x, center.y),
        Point::new(bounds.right() - inset_x, center.y),
        Point::new(center.x, bounds.y + inset_y),
        Point::new(center.x, bounds.bottom() - inset_y),
    ];
    room.spawn_points.extend(spawns);
    spawns.len()
}

/// Stamps the theme's cover pattern, keeping only pieces that fit the same
/// rules as random obstacles and stay out of `protected`.
fn add_cover<R: RandomSource + ?Sized>(
    room: &mut Room,
    scale: f32,
    protected: Option<Rect>,
    margin: f32,
    rng: &mut R,
) -> usize {
    let pieces = cover_pieces(room, scale, rng);
    let mut placed = 0;
    for piece in pieces {
        if protected.is_some_and(|zone| zone.intersects(&piece)) || !fits(room, &piece, margin) {
            continue;
        }
        room.obstacles.push(piece);
        placed += 1;
    }
    placed
}

fn cover_pieces<R: RandomSource + ?Sized>(room: &Room, scale: f32, rng: &mut R) -> Vec<Rect> {
    let bounds = room.bounds;
    let center = bounds.center();
    let (min_size, max_size) = room.theme.obstacle_size_range();

    match room.theme.cover_style() {
        CoverStyle::PillarCross => {
            let side = max_size * scale;
            let reach_x = bounds.width * 0.3;
            let reach_y = bounds.height * 0.3;
            [(-reach_x, 0.0), (reach_x, 0.0), (0.0, -reach_y), (0.0, reach_y)]
                .into_iter()
                .map(|(dx, dy)| {
                    Rect::centered(Point::new(center.x + dx, center.y + dy), side, side)
                })
                .collect()
        }
        CoverStyle::RadialCluster => {
            let short_side = bounds.width.min(bounds.height);
            (0..RADIAL_CLUSTER_PIECES)
                .map(|_| {
                    let angle = rng.range_f32(0.0, TAU);
                    let distance = short_side * rng.range_f32(0.2, 0.4);
                    let side = rng.range_f32(min_size, max_size) * scale;
                    let point = Point::new(
                        center.x + distance * angle.cos(),
                        center.y + distance * angle.sin(),
                    );
                    Rect::centered(point, side, side)
                })
                .collect()
        }
        CoverStyle::BarricadePairs => {
            let length = max_size * BARRICADE_LENGTH_FACTOR * scale;
            let thickness = min_size * scale;
            let reach_x = bounds.width * 0.3;
            let reach_y = bounds.height * 0.3;
            vec![
                Rect::centered(Point::new(center.x - reach_x, center.y), length, thickness),
                Rect::centered(Point::new(center.x + reach_x, center.y), length, thickness),
                Rect::centered(Point::new(center.x, center.y - reach_y), thickness, length),
                Rect::centered(Point::new(center.x, center.y + reach_y), thickness, length),
            ]
        }
    }
}

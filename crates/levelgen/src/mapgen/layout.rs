//! Layout strategies that lay down the initial room set for a wave tier.
//!
//! Every strategy clamps its rooms into the world rectangle instead of
//! rejecting placements that would spill over an edge.

use std::f32::consts::TAU;

use crate::config::LayoutConfig;
use crate::geometry::{Point, Rect};
use crate::rng::RandomSource;

use super::environment::EnvironmentTheme;
use super::model::{Room, RoomKind, tags};
use super::progression::LayoutTier;

const SATELLITE_KINDS: [RoomKind; 4] =
    [RoomKind::Chamber, RoomKind::Chokepoint, RoomKind::Sanctuary, RoomKind::Maze];

pub(super) struct LayoutContext<'a> {
    pub(super) world: Rect,
    pub(super) config: &'a LayoutConfig,
    pub(super) theme: EnvironmentTheme,
    pub(super) wave: u32,
}

pub(super) fn build_layout<R: RandomSource + ?Sized>(
    tier: LayoutTier,
    context: &LayoutContext<'_>,
    rng: &mut R,
) -> Vec<Room> {
    match tier {
        LayoutTier::Intro => intro_layout(context),
        LayoutTier::Standard => standard_layout(context, rng),
        LayoutTier::Complex => complex_layout(context, rng),
        LayoutTier::Boss => boss_layout(context),
        LayoutTier::Endgame => endgame_layout(context),
    }
}

fn intro_layout(context: &LayoutContext<'_>) -> Vec<Room> {
    let bounds = context.world.inset(context.config.intro_margin).unwrap_or(context.world);
    vec![Room::new(bounds, RoomKind::Arena, context.theme).tagged(tags::INTRO_ARENA)]
}

fn standard_layout<R: RandomSource + ?Sized>(
    context: &LayoutContext<'_>,
    rng: &mut R,
) -> Vec<Room> {
    let config = context.config;
    let columns = config.grid_columns;
    let rows = config.grid_rows;
    let cell_width = context.world.width / columns as f32;
    let cell_height = context.world.height / rows as f32;
    let min_fill = config.grid_fill - config.grid_jitter;
    let max_fill = (config.grid_fill + config.grid_jitter).min(1.0);

    let mut rooms = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let cell_center = Point::new(
                context.world.x + (column as f32 + 0.5) * cell_width,
                context.world.y + (row as f32 + 0.5) * cell_height,
            );
            let width = cell_width * rng.range_f32(min_fill, max_fill);
            let height = cell_height * rng.range_f32(min_fill, max_fill);
            let bounds = Rect::centered(cell_center, width, height).clamped_within(&context.world);

            let is_center = row == rows / 2 && column == columns / 2;
            let is_edge = row == 0 || column == 0 || row == rows - 1 || column == columns - 1;
            let room = if is_center {
                Room::new(bounds, RoomKind::Arena, context.theme).tagged(tags::CENTRAL_ARENA)
            } else if is_edge {
                let kind =
                    if (row + column) % 2 == 0 { RoomKind::Chamber } else { RoomKind::Chokepoint };
                Room::new(bounds, kind, context.theme)
            } else {
                Room::new(bounds, RoomKind::Corridor, context.theme)
            };
            rooms.push(room);
        }
    }
    rooms
}

fn complex_layout<R: RandomSource + ?Sized>(
    context: &LayoutContext<'_>,
    rng: &mut R,
) -> Vec<Room> {
    let config = context.config;
    let world = context.world;
    let center = world.center();
    let hub =
        Rect::centered(center, world.width * config.hub_ratio, world.height * config.hub_ratio);

    let mut rooms = Vec::with_capacity(config.satellite_count + 1);
    rooms.push(Room::new(hub, RoomKind::Arena, context.theme).tagged(tags::CENTRAL_HUB));

    let step = TAU / config.satellite_count as f32;
    let phase = rng.range_f32(0.0, step);
    let radius = world.width.min(world.height) * config.satellite_radius_ratio;
    for index in 0..config.satellite_count {
        let angle = phase + index as f32 * step;
        let satellite_center =
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
        let bounds =
            Rect::centered(satellite_center, config.satellite_width, config.satellite_height)
                .clamped_within(&world);
        let kind = SATELLITE_KINDS[index % SATELLITE_KINDS.len()];
        rooms.push(Room::new(bounds, kind, context.theme).tagged(tags::SATELLITE));
    }
    rooms
}

fn boss_layout(context: &LayoutContext<'_>) -> Vec<Room> {
    let config = context.config;
    let world = context.world;
    let ratio = (config.boss_base_ratio + config.boss_ratio_per_wave * context.wave as f32)
        .min(config.boss_max_ratio);
    let arena = Rect::centered(world.center(), world.width * ratio, world.height * ratio);

    let mut rooms = vec![Room::new(arena, RoomKind::Arena, context.theme).tagged(tags::BOSS_ARENA)];

    let inset = config.approach_inset;
    let far_x = world.right() - inset - config.approach_width;
    let far_y = world.bottom() - inset - config.approach_height;
    let near_x = world.x + inset;
    let near_y = world.y + inset;
    for (x, y) in [(near_x, near_y), (far_x, near_y), (near_x, far_y), (far_x, far_y)] {
        let bounds = Rect::new(x, y, config.approach_width, config.approach_height)
            .clamped_within(&world);
        rooms.push(Room::new(bounds, RoomKind::Chamber, context.theme).tagged(tags::APPROACH));
    }
    rooms
}

fn endgame_layout(context: &LayoutContext<'_>) -> Vec<Room> {
    let config = context.config;
    let world = context.world;
    let center = world.center();
    let main = Rect::centered(
        center,
        world.width * config.endgame_ratio,
        world.height * config.endgame_ratio,
    );

    let mut rooms = vec![Room::new(main, RoomKind::Arena, context.theme).tagged(tags::MAIN_ARENA)];

    let offset_x = world.width * config.endgame_offset_ratio;
    let offset_y = world.height * config.endgame_offset_ratio;
    for (dx, dy) in [(-offset_x, 0.0), (offset_x, 0.0), (0.0, -offset_y), (0.0, offset_y)] {
        let satellite_center = Point::new(center.x + dx, center.y + dy);
        let bounds =
            Rect::centered(satellite_center, config.satellite_width, config.satellite_height)
                .clamped_within(&world);
        rooms.push(Room::new(bounds, RoomKind::Chamber, context.theme).tagged(tags::SATELLITE));
    }
    rooms
}

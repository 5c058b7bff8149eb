//! Public data models for generated rooms and levels.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

use super::environment::EnvironmentTheme;
use super::progression::LayoutTier;

pub mod tags {
    pub const INTRO_ARENA: &str = "intro_arena";
    pub const CENTRAL_ARENA: &str = "central_arena";
    pub const CENTRAL_HUB: &str = "central_hub";
    pub const SATELLITE: &str = "satellite";
    pub const BOSS_ARENA: &str = "boss_arena";
    pub const APPROACH: &str = "approach";
    pub const MAIN_ARENA: &str = "main_arena";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Arena,
    Corridor,
    Chamber,
    Chokepoint,
    Sanctuary,
    Maze,
}

/// Read-only morality snapshot supplied by the progression system.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Morality {
    pub faith: f32,
    pub corruption: f32,
}

impl Morality {
    pub fn new(faith: f32, corruption: f32) -> Self {
        Self { faith, corruption }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub bounds: Rect,
    pub kind: RoomKind,
    pub theme: EnvironmentTheme,
    pub obstacles: Vec<Rect>,
    /// Centers of the rooms this room has a corridor to.
    pub connections: Vec<Point>,
    pub spawn_points: Vec<Point>,
    pub tags: Vec<String>,
}

impl Room {
    pub fn new(bounds: Rect, kind: RoomKind, theme: EnvironmentTheme) -> Self {
        Self {
            bounds,
            kind,
            theme,
            obstacles: Vec::new(),
            connections: Vec::new(),
            spawn_points: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn tagged(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn area(&self) -> f32 {
        self.bounds.area()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// True when either side already records the other's center as an endpoint.
    pub fn is_connected_to(&self, other: &Room) -> bool {
        self.connections.contains(&other.center()) || other.connections.contains(&self.center())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub wave: u32,
    pub tier: LayoutTier,
    pub theme: EnvironmentTheme,
    pub rooms: Vec<Room>,
    pub walls: Vec<Rect>,
}

impl GeneratedLevel {
    /// Every room spawn point, in room order, on the integer grid.
    pub fn spawn_points(&self) -> Vec<(i32, i32)> {
        self.rooms
            .iter()
            .flat_map(|room| room.spawn_points.iter().map(|point| point.to_int()))
            .collect()
    }

    pub fn boss_arena(&self) -> Option<&Room> {
        boss_arena(&self.rooms)
    }
}

/// The room tagged `boss_arena`, else the largest room, else `None`.
pub fn boss_arena(rooms: &[Room]) -> Option<&Room> {
    rooms
        .iter()
        .find(|room| room.has_tag(tags::BOSS_ARENA))
        .or_else(|| rooms.iter().max_by(|a, b| a.area().total_cmp(&b.area())))
}

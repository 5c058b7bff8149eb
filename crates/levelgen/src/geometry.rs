//! Axis-aligned rectangles and points in world units.
//!
//! Rooms, obstacles, corridors, and collision walls all share the same
//! [`Rect`] shape; there is no per-role rectangle type.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rounds to the integer coordinates used by the enemy spawner.
    pub fn to_int(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height }
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y + self.height / 2.0 }
    }

    pub fn area(self) -> f32 {
        self.width * self.height
    }

    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Shrinks every side by `margin`. Returns `None` when nothing is left.
    pub fn inset(self, margin: f32) -> Option<Self> {
        let shrunk = Self {
            x: self.x + margin,
            y: self.y + margin,
            width: self.width - 2.0 * margin,
            height: self.height - 2.0 * margin,
        };
        shrunk.is_valid().then_some(shrunk)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlap-or-touch test used for room adjacency.
    pub fn touches(self, other: &Self) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn contains_rect(self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Moves the rectangle inside `bounds` without resizing it, shrinking only
    /// when it is larger than `bounds` itself.
    pub fn clamped_within(self, bounds: &Self) -> Self {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        let x = self.x.clamp(bounds.x, bounds.right() - width);
        let y = self.y.clamp(bounds.y, bounds.bottom() - height);
        Self { x, y, width, height }
    }

    /// Intersection-clipped rectangle, or `None` when the result is empty.
    pub fn clipped_to(self, bounds: &Self) -> Option<Self> {
        let x = self.x.max(bounds.x);
        let y = self.y.max(bounds.y);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());
        let clipped = Self { x, y, width: right - x, height: bottom - y };
        clipped.is_valid().then_some(clipped)
    }
}

//! Coarse occupancy grid over world space, used to wall off unclaimed area.

use crate::geometry::Rect;

pub(super) struct OccupancyGrid {
    world: Rect,
    cell_size: f32,
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub(super) fn new(world: Rect, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "occupancy cells must have a positive size");
        assert!(world.is_valid(), "world extents must be positive");
        let columns = (world.width / cell_size).ceil() as usize;
        let rows = (world.height / cell_size).ceil() as usize;
        Self { world, cell_size, columns, rows, cells: vec![false; columns * rows] }
    }

    pub(super) fn columns(&self) -> usize {
        self.columns
    }

    pub(super) fn rows(&self) -> usize {
        self.rows
    }

    /// Marks every cell whose interior overlaps `area`. Cells that only share
    /// an edge with `area` stay free.
    pub(super) fn mark(&mut self, area: &Rect) {
        let Some(area) = area.clipped_to(&self.world) else {
            return;
        };
        let (first_col, last_col) = self.span(area.x - self.world.x, area.width, self.columns);
        let (first_row, last_row) = self.span(area.y - self.world.y, area.height, self.rows);
        for row in first_row..last_row {
            for col in first_col..last_col {
                self.cells[row * self.columns + col] = true;
            }
        }
    }

    pub(super) fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.cells[row * self.columns + col]
    }

    /// World rectangle of a cell, clipped to the world for the ragged last
    /// row and column.
    pub(super) fn cell_rect(&self, col: usize, row: usize) -> Rect {
        let x = self.world.x + col as f32 * self.cell_size;
        let y = self.world.y + row as f32 * self.cell_size;
        let width = self.cell_size.min(self.world.right() - x);
        let height = self.cell_size.min(self.world.bottom() - y);
        Rect::new(x, y, width, height)
    }

    pub(super) fn free_cells(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns)
                .filter(move |&col| !self.is_occupied(col, row))
                .map(move |col| self.cell_rect(col, row))
        })
    }

    fn span(&self, offset: f32, length: f32, limit: usize) -> (usize, usize) {
        let first = (offset / self.cell_size).floor().max(0.0) as usize;
        let last = ((offset + length) / self.cell_size).ceil().max(0.0) as usize;
        (first.min(limit), last.min(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions_round_up() {
        let grid = OccupancyGrid::new(Rect::new(0.0, 0.0, 1000.0, 300.0), 128.0);
        assert_eq!((grid.columns(), grid.rows()), (8, 3));
        assert_eq!(grid.cell_rect(7, 2), Rect::new(896.0, 256.0, 104.0, 44.0));
    }

    #[test]
    fn marking_is_strict_on_cell_edges() {
        let mut grid = OccupancyGrid::new(Rect::new(0.0, 0.0, 512.0, 512.0), 128.0);
        grid.mark(&Rect::new(128.0, 128.0, 128.0, 128.0));

        assert!(grid.is_occupied(1, 1));
        assert!(!grid.is_occupied(0, 1));
        assert!(!grid.is_occupied(2, 1));
        assert!(!grid.is_occupied(1, 2));
        assert_eq!(grid.free_cells().count(), 15);
    }

    #[test]
    fn partial_overlap_claims_the_whole_cell() {
        let mut grid = OccupancyGrid::new(Rect::new(0.0, 0.0, 512.0, 512.0), 128.0);
        grid.mark(&Rect::new(100.0, 10.0, 40.0, 20.0));
        assert!(grid.is_occupied(0, 0));
        assert!(grid.is_occupied(1, 0));
        assert_eq!(grid.free_cells().count(), 14);
    }

    #[test]
    fn areas_outside_the_world_are_ignored() {
        let mut grid = OccupancyGrid::new(Rect::new(0.0, 0.0, 256.0, 256.0), 128.0);
        grid.mark(&Rect::new(-500.0, -500.0, 100.0, 100.0));
        grid.mark(&Rect::new(200.0, 200.0, 500.0, 500.0));
        assert!(grid.is_occupied(1, 1));
        assert_eq!(grid.free_cells().count(), 3);
    }
}

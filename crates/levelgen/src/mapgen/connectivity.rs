//! Room-graph connectivity checks.
//!
//! Nearest-neighbor corridors do not guarantee a single connected level on
//! their own, so generation audits the result here instead of assuming it.

use super::model::Room;

/// Union-find over room indices.
pub(super) struct DisjointSets {
    parents: Vec<usize>,
}

impl DisjointSets {
    pub(super) fn new(len: usize) -> Self {
        Self { parents: (0..len).collect() }
    }

    pub(super) fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        let mut cursor = index;
        while self.parents[cursor] != root {
            let next = self.parents[cursor];
            self.parents[cursor] = root;
            cursor = next;
        }
        root
    }

    pub(super) fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parents[root_b] = root_a;
        }
    }

    pub(super) fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Groups of indices sharing a root, ordered by their smallest member.
    pub(super) fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of_root = vec![usize::MAX; self.parents.len()];
        for index in 0..self.parents.len() {
            let root = self.find(index);
            if group_of_root[root] == usize::MAX {
                group_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[group_of_root[root]].push(index);
        }
        groups
    }
}

/// Components of the physical room graph, where two rooms are adjacent when
/// their rectangles overlap or share an edge. Corridors join the rooms they
/// were carved between because they overlap both endpoints.
pub fn connected_components(rooms: &[Room]) -> Vec<Vec<usize>> {
    let mut sets = DisjointSets::new(rooms.len());
    for (left_index, left) in rooms.iter().enumerate() {
        for (offset, right) in rooms[left_index + 1..].iter().enumerate() {
            if left.bounds.touches(&right.bounds) {
                sets.union(left_index, left_index + 1 + offset);
            }
        }
    }
    sets.groups()
}

pub fn is_fully_connected(rooms: &[Room]) -> bool {
    connected_components(rooms).len() <= 1
}

#[cfg(test)]
mod tests {
    use crate::geometry::Rect;
    use crate::mapgen::{EnvironmentTheme, RoomKind};

    use super::*;

    fn room(x: f32, y: f32, width: f32, height: f32) -> Room {
        Room::new(Rect::new(x, y, width, height), RoomKind::Chamber, EnvironmentTheme::HiveCity)
    }

    #[test]
    fn disjoint_sets_merge_transitively() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);
        assert!(sets.same_set(0, 3));
        assert!(!sets.same_set(0, 2));
        assert_eq!(sets.groups(), vec![vec![0, 1, 3, 4], vec![2]]);
    }

    #[test]
    fn separated_rooms_form_separate_components() {
        let rooms = vec![room(0.0, 0.0, 100.0, 100.0), room(500.0, 0.0, 100.0, 100.0)];
        assert_eq!(connected_components(&rooms).len(), 2);
        assert!(!is_fully_connected(&rooms));
    }

    #[test]
    fn a_bridging_corridor_joins_both_rooms() {
        let rooms = vec![
            room(0.0, 0.0, 100.0, 100.0),
            room(500.0, 0.0, 100.0, 100.0),
            room(50.0, 30.0, 500.0, 40.0),
        ];
        assert!(is_fully_connected(&rooms));
    }

    #[test]
    fn empty_and_single_room_sets_count_as_connected() {
        assert!(is_fully_connected(&[]));
        assert!(is_fully_connected(&[room(0.0, 0.0, 10.0, 10.0)]));
    }
}

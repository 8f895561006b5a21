use std::collections::BTreeSet;

use super::grid::{Facing, GridPos, MazeGrid};

/// Exploration tracking for the minimap
///
/// "Visited" cells are ones the party physically stood in. "Revealed" cells
/// are ones the minimap draws, which includes everything in a straight line
/// of sight down open corridors. Every visited cell is also revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Minimap {
    visited: BTreeSet<GridPos>,
    revealed: BTreeSet<GridPos>,
}

impl Minimap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all exploration
    pub fn reset(&mut self) {
        self.visited.clear();
        self.revealed.clear();
    }

    /// Records the party entering `pos`
    ///
    /// Returns true if the cell had not been visited before.
    pub fn visit(&mut self, pos: GridPos, grid: &MazeGrid) -> bool {
        let newly_visited = self.visited.insert(pos);
        self.revealed.insert(pos);

        for facing in Facing::all() {
            let mut cursor = pos;
            while grid.can_move(cursor, facing) {
                cursor = cursor.step(facing);
                self.revealed.insert(cursor);
            }
        }

        newly_visited
    }

    /// Replaces all exploration state wholesale
    pub fn restore(&mut self, visited: impl IntoIterator<Item = GridPos>, revealed: impl IntoIterator<Item = GridPos>) {
        self.visited = visited.into_iter().collect();
        self.revealed = revealed.into_iter().collect();
    }

    pub fn visited(&self) -> &BTreeSet<GridPos> {
        &self.visited
    }

    pub fn revealed(&self) -> &BTreeSet<GridPos> {
        &self.revealed
    }

    pub fn is_visited(&self, pos: GridPos) -> bool {
        self.visited.contains(&pos)
    }

    pub fn is_revealed(&self, pos: GridPos) -> bool {
        self.revealed.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generator::build;

    #[test]
    fn test_visit_reveals_line_of_sight() {
        let mut grid = MazeGrid::walled(4, 1);
        grid.carve(GridPos::new(0, 0), Facing::East);
        grid.carve(GridPos::new(1, 0), Facing::East);

        let mut minimap = Minimap::new();
        assert!(minimap.visit(GridPos::new(0, 0), &grid));

        assert!(minimap.is_visited(GridPos::new(0, 0)));
        assert!(!minimap.is_visited(GridPos::new(2, 0)));
        assert!(minimap.is_revealed(GridPos::new(2, 0)));
        // Wall between 2 and 3 blocks the view
        assert!(!minimap.is_revealed(GridPos::new(3, 0)));
    }

    #[test]
    fn test_revisit_is_not_new() {
        let grid = build(3, 4, 4).unwrap();
        let mut minimap = Minimap::new();
        assert!(minimap.visit(grid.start(), &grid));
        assert!(!minimap.visit(grid.start(), &grid));
    }

    #[test]
    fn test_restore_replaces_state() {
        let grid = build(3, 4, 4).unwrap();
        let mut minimap = Minimap::new();
        minimap.visit(grid.start(), &grid);

        minimap.restore([GridPos::new(1, 1)], [GridPos::new(1, 1), GridPos::new(1, 2)]);
        assert_eq!(minimap.visited().len(), 1);
        assert_eq!(minimap.revealed().len(), 2);
        assert!(minimap.is_visited(GridPos::new(1, 1)));
    }
}

use super::grid::{Facing, GridPos, MazeGrid};
use super::minimap::Minimap;

/// The party's marker inside the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MazePlayer {
    position: GridPos,
    facing: Facing,
}

impl MazePlayer {
    pub fn new(position: GridPos, facing: Facing) -> Self {
        MazePlayer { position, facing }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Puts the party somewhere without walking there
    ///
    /// No exploration side effects fire.
    pub fn place(&mut self, position: GridPos, facing: Facing) {
        self.position = position;
        self.facing = facing;
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.turn_right();
    }

    /// Walks one cell forward if no wall is in the way
    ///
    /// Entering a cell marks it explored and updates the minimap. Returns
    /// false when blocked.
    pub fn step_forward(&mut self, grid: &mut MazeGrid, minimap: &mut Minimap) -> bool {
        if !grid.can_move(self.position, self.facing) {
            return false;
        }
        self.position = self.position.step(self.facing);
        self.enter(grid, minimap);
        true
    }

    /// Runs the "entered a cell" side effects for the current position
    pub fn enter(&self, grid: &mut MazeGrid, minimap: &mut Minimap) {
        if let Some(cell) = grid.cell_mut(self.position) {
            cell.explored = true;
        }
        minimap.visit(self.position, grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_blocked_by_wall() {
        let mut grid = MazeGrid::walled(3, 3);
        let mut minimap = Minimap::new();
        let mut player = MazePlayer::new(GridPos::new(1, 1), Facing::North);

        assert!(!player.step_forward(&mut grid, &mut minimap));
        assert_eq!(player.position(), GridPos::new(1, 1));
    }

    #[test]
    fn test_step_marks_explored() {
        let mut grid = MazeGrid::walled(3, 3);
        grid.carve(GridPos::new(1, 1), Facing::North);
        let mut minimap = Minimap::new();
        let mut player = MazePlayer::new(GridPos::new(1, 1), Facing::North);

        assert!(player.step_forward(&mut grid, &mut minimap));
        assert_eq!(player.position(), GridPos::new(1, 0));
        assert!(grid.cell(GridPos::new(1, 0)).unwrap().explored);
        assert!(minimap.is_visited(GridPos::new(1, 0)));
    }

    #[test]
    fn test_place_has_no_side_effects() {
        let mut player = MazePlayer::default();
        player.place(GridPos::new(2, 2), Facing::West);
        assert_eq!(player.position(), GridPos::new(2, 2));
        assert_eq!(player.facing(), Facing::West);
    }
}
